//! Reversi (Othello) on a fixed 8x8 board.

use serde::{Deserialize, Serialize};
use tabletop_core::{Color, Direction, Move, Point};

use super::{DrawReason, GameResult, RuleSet, Score, Variant, WinReason};
use crate::board::Board;
use crate::state::GameState;
use crate::GameError;

/// The only board size Reversi is played on.
pub const REVERSI_SIZE: u8 = 8;

/// A run of opponent stones flipped in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipRun {
    /// Direction walked from the placed stone.
    pub direction: Direction,
    /// Number of stones flipped, starting next to the placed stone.
    pub length: u8,
}

/// Every run flipped by one placement.
///
/// Undo replays these runs instead of walking outward from the undone
/// stone: a walk over the current board cannot tell where a flipped run
/// ended, since the stones beyond it may share the mover's color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlipRecord {
    pub runs: Vec<FlipRun>,
}

/// Reversi rules and the flip log undo walks back.
///
/// Undo walks each recorded direction from the undone stone and recolors
/// the recorded number of stones to the opponent's color. That inverse is
/// only sound because a flipped stone can have had just one other color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reversi {
    /// One record per placement, same order as the move history.
    pub(crate) flips: Vec<FlipRecord>,
}

impl Reversi {
    /// Runs `color` would flip by playing at `point`. Empty when illegal.
    pub fn flips(board: &Board, point: Point, color: Color) -> Vec<FlipRun> {
        if !board.is_empty(point) {
            return Vec::new();
        }
        let size = board.size();
        let opponent = color.opposite();

        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let mut length = 0u8;
                let mut cur = point.step(direction, size);
                while let Some(p) = cur {
                    match board.color_at(p) {
                        Some(c) if c == opponent => length += 1,
                        Some(_) if length > 0 => return Some(FlipRun { direction, length }),
                        _ => return None,
                    }
                    cur = p.step(direction, size);
                }
                None
            })
            .collect()
    }

    /// Returns true if `color` has any legal placement on `board`.
    pub fn has_legal_move(board: &Board, color: Color) -> bool {
        board
            .points()
            .any(|p| !Self::flips(board, p, color).is_empty())
    }

    /// Stones of each color on `board`.
    pub fn stone_counts(board: &Board) -> Score {
        Score {
            black: board.count(Color::Black) as u32,
            white: board.count(Color::White) as u32,
        }
    }

    /// Recolors `length` stones starting one step from `origin`.
    fn recolor_run(board: &mut Board, origin: Point, run: FlipRun, color: Color) {
        let mut cur = origin.step(run.direction, board.size());
        for _ in 0..run.length {
            let Some(p) = cur else { break };
            board.recolor(p, color);
            cur = p.step(run.direction, board.size());
        }
    }
}

impl RuleSet for Reversi {
    fn variant(&self) -> Variant {
        Variant::Reversi
    }

    fn board_size(&self, requested: u8) -> u8 {
        if requested != REVERSI_SIZE {
            tracing::warn!(
                "Reversi is played on an {0}x{0} board; ignoring requested size {1}",
                REVERSI_SIZE,
                requested
            );
        }
        REVERSI_SIZE
    }

    fn setup(&self, board: &mut Board) {
        let mid = board.size() / 2;
        let opening = [
            (Point::new(mid - 1, mid - 1), Color::White),
            (Point::new(mid, mid), Color::White),
            (Point::new(mid, mid - 1), Color::Black),
            (Point::new(mid - 1, mid), Color::Black),
        ];
        for (point, color) in opening {
            board.set(point, Some(color));
        }
    }

    fn play(&mut self, state: &mut GameState, point: Point) -> Result<(), GameError> {
        let mover = state.to_move;
        state.board.check_vacant(point)?;
        let runs = Self::flips(&state.board, point, mover);
        if runs.is_empty() {
            return Err(GameError::IllegalMove(point));
        }

        state.history.push(Move::place(point, mover), &state.board)?;
        state.board.place(point, mover)?;
        for &run in &runs {
            Self::recolor_run(&mut state.board, point, run, mover);
        }
        tracing::debug!(
            "{} plays {}, flipping {} stones",
            mover,
            point,
            runs.iter().map(|r| r.length as u32).sum::<u32>()
        );
        self.flips.push(FlipRecord { runs });

        let opponent = mover.opposite();
        if Self::has_legal_move(&state.board, opponent) {
            state.to_move = opponent;
        } else if Self::has_legal_move(&state.board, mover) {
            tracing::debug!("{} has no legal move and is skipped", opponent);
            state.to_move = mover;
        } else {
            let counts = Self::stone_counts(&state.board);
            state.finish(counts.result(WinReason::StoneCount, DrawReason::EqualStoneCount));
        }
        Ok(())
    }

    fn undo(&mut self, state: &mut GameState) -> Result<Move, GameError> {
        let (Some(last), Some(record)) = (state.history.last(), self.flips.last()) else {
            return Err(GameError::NoMoveToUndo);
        };
        let Some(point) = last.point() else {
            return Err(GameError::NoMoveToUndo);
        };

        let opponent = last.color().opposite();
        for &run in &record.runs {
            Self::recolor_run(&mut state.board, point, run, opponent);
        }
        state.board.remove(point);
        state.history.pop();
        self.flips.pop();
        state.to_move = last.color();
        state.result = None;
        tracing::debug!("Undid {}", last);
        Ok(last)
    }

    fn is_legal(&self, state: &GameState, point: Point) -> bool {
        !Self::flips(&state.board, point, state.to_move).is_empty()
    }

    fn reset(&mut self) {
        self.flips.clear();
    }
}
