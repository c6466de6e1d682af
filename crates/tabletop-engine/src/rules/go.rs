//! Go: captures, suicide, positional superko and territory scoring.
//!
//! Every placement is resolved on a copy of the board: the stone is put
//! down, adjacent opponent groups without liberties are removed, and the
//! mover's own group is then checked for suicide. The resulting position
//! is compared against every position produced by an earlier placement
//! in this game; a repeat is rejected. Only then is the copy committed.
//!
//! Undo does not try to invert a capture. It drops the last move and
//! replays the remaining history onto an empty board.

use tabletop_core::{Color, Move, Point};

use super::{DrawReason, GameResult, RuleSet, Score, Variant, WinReason};
use crate::board::Board;
use crate::history::MoveHistory;
use crate::state::GameState;
use crate::GameError;

/// Go rules and the bookkeeping they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Go {
    /// Position after each placement, oldest first.
    pub(crate) snapshots: Vec<Board>,
    /// Zobrist hash of each snapshot, same order.
    pub(crate) snapshot_hashes: Vec<u64>,
    /// Stones captured by [Black, White].
    pub(crate) captures: [u32; 2],
    /// Passes since the last placement.
    pub(crate) consecutive_passes: u8,
}

/// Outcome of resolving a placement on a scratch board.
struct Placement {
    board: Board,
    captured: u32,
}

impl Go {
    /// Rebuilds Go bookkeeping for a history, returning the resulting board.
    ///
    /// Used by undo. Snapshots, captures and the pass counter all come from
    /// the replay, so they always agree with the history.
    pub(crate) fn replay(history: &MoveHistory, size: u8) -> Result<(Go, Board), GameError> {
        let mut board = Board::new(size)?;
        let mut go = Go::default();

        for mov in history.iter() {
            if let Move::Place { point, color } = *mov {
                let placement = Self::resolve(&board, point, color)?;
                go.captures[color.index()] += placement.captured;
                go.snapshot_hashes.push(placement.board.zobrist_hash());
                go.snapshots.push(placement.board.clone());
                board = placement.board;
            }
        }
        go.consecutive_passes = u8::try_from(history.trailing_passes()).unwrap_or(u8::MAX);
        Ok((go, board))
    }

    /// Rules state as recorded in a save, before it is checked against a replay.
    pub(crate) fn restore(
        snapshots: Vec<Board>,
        captures: [u32; 2],
        consecutive_passes: u8,
    ) -> Go {
        let snapshot_hashes = snapshots.iter().map(Board::zobrist_hash).collect();
        Go {
            snapshots,
            snapshot_hashes,
            captures,
            consecutive_passes,
        }
    }

    /// Stones captured by `color` so far.
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    /// Number of recorded positions used for repetition checks.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Passes since the last placement.
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Territory plus captures for each color on `board`.
    pub fn score(&self, board: &Board) -> Score {
        let territory = Self::territory(board);
        Score {
            black: territory.black + self.captures[Color::Black.index()],
            white: territory.white + self.captures[Color::White.index()],
        }
    }

    /// Empty cells in regions bordered by exactly one color.
    pub fn territory(board: &Board) -> Score {
        let size = board.size();
        let mut seen = vec![false; board.area()];
        let mut territory = Score::default();

        for start in board.points() {
            if seen[start.index(size)] || !board.is_empty(start) {
                continue;
            }

            let mut region = 0u32;
            let mut borders = [false; 2];
            let mut stack = vec![start];
            seen[start.index(size)] = true;

            while let Some(p) = stack.pop() {
                region += 1;
                for n in board.neighbors(p) {
                    match board.color_at(n) {
                        Some(color) => borders[color.index()] = true,
                        None => {
                            let i = n.index(size);
                            if !seen[i] {
                                seen[i] = true;
                                stack.push(n);
                            }
                        }
                    }
                }
            }

            match borders {
                [true, false] => territory.black += region,
                [false, true] => territory.white += region,
                _ => {}
            }
        }

        territory
    }

    /// The connected same-color group containing `start`. Empty if `start` is empty.
    pub fn group(board: &Board, start: Point) -> Vec<Point> {
        let Some(color) = board.color_at(start) else {
            return Vec::new();
        };
        let size = board.size();
        let mut seen = vec![false; board.area()];
        let mut stack = vec![start];
        let mut group = Vec::new();
        seen[start.index(size)] = true;

        while let Some(p) = stack.pop() {
            group.push(p);
            for n in board.neighbors(p) {
                let i = n.index(size);
                if !seen[i] && board.color_at(n) == Some(color) {
                    seen[i] = true;
                    stack.push(n);
                }
            }
        }
        group
    }

    /// Returns true if any stone of `group` touches an empty cell.
    pub fn has_liberty(board: &Board, group: &[Point]) -> bool {
        group
            .iter()
            .any(|&p| board.neighbors(p).any(|n| board.is_empty(n)))
    }

    /// Places `color` at `point` on a copy of `board`, removing captured groups.
    ///
    /// Does not check for repetition.
    fn resolve(board: &Board, point: Point, color: Color) -> Result<Placement, GameError> {
        let mut next = board.clone();
        next.place(point, color)?;

        let opponent = color.opposite();
        let mut captured = 0u32;
        for n in board.neighbors(point) {
            // A group touching the stone twice is gone after the first removal.
            if next.color_at(n) != Some(opponent) {
                continue;
            }
            let group = Self::group(&next, n);
            if !Self::has_liberty(&next, &group) {
                for &p in &group {
                    next.remove(p);
                }
                captured += group.len() as u32;
            }
        }

        if captured == 0 && !Self::has_liberty(&next, &Self::group(&next, point)) {
            return Err(GameError::SuicideMove(point));
        }

        Ok(Placement {
            board: next,
            captured,
        })
    }

    /// Returns true if `board` matches any earlier recorded position.
    fn repeats(&self, board: &Board, hash: u64) -> bool {
        self.snapshot_hashes
            .iter()
            .zip(&self.snapshots)
            .any(|(&h, snapshot)| h == hash && snapshot == board)
    }
}

impl RuleSet for Go {
    fn variant(&self) -> Variant {
        Variant::Go
    }

    fn play(&mut self, state: &mut GameState, point: Point) -> Result<(), GameError> {
        let mover = state.to_move;
        let placement = Self::resolve(&state.board, point, mover)?;
        let hash = placement.board.zobrist_hash();
        if self.repeats(&placement.board, hash) {
            return Err(GameError::RepeatedPosition(point));
        }

        state.history.push(Move::place(point, mover), &state.board)?;
        if placement.captured > 0 {
            tracing::debug!("{} at {} captures {} stones", mover, point, placement.captured);
        } else {
            tracing::debug!("{} plays {}", mover, point);
        }
        self.captures[mover.index()] += placement.captured;
        self.snapshots.push(placement.board.clone());
        self.snapshot_hashes.push(hash);
        self.consecutive_passes = 0;
        state.board = placement.board;
        state.to_move = mover.opposite();
        Ok(())
    }

    fn pass(&mut self, state: &mut GameState) -> Result<(), GameError> {
        let mover = state.to_move;
        state.history.push(Move::pass(mover), &state.board)?;
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);
        tracing::debug!("{} passes", mover);

        if self.consecutive_passes >= 2 {
            let score = self.score(&state.board);
            tracing::debug!("Final score: black {}, white {}", score.black, score.white);
            state.finish(score.result(WinReason::Score, DrawReason::EqualScore));
        } else {
            state.to_move = mover.opposite();
        }
        Ok(())
    }

    fn undo(&mut self, state: &mut GameState) -> Result<Move, GameError> {
        let last = state.history.last().ok_or(GameError::NoMoveToUndo)?;

        let mut history = state.history.clone();
        history.pop();
        let (rebuilt, board) = Self::replay(&history, state.board.size())?;

        *self = rebuilt;
        state.history = history;
        state.board = board;
        state.to_move = last.color();
        state.result = None;
        tracing::debug!("Undid {}", last);
        Ok(last)
    }

    fn is_legal(&self, state: &GameState, point: Point) -> bool {
        match Self::resolve(&state.board, point, state.to_move) {
            Ok(placement) => {
                let hash = placement.board.zobrist_hash();
                !self.repeats(&placement.board, hash)
            }
            Err(_) => false,
        }
    }

    fn reset(&mut self) {
        *self = Go::default();
    }
}
