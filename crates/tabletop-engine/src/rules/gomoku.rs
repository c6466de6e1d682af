//! Five-in-a-row.

use tabletop_core::{Color, Direction, Move, Point};

use super::{DrawReason, GameResult, RuleSet, Variant, WinReason};
use crate::board::Board;
use crate::state::GameState;
use crate::GameError;

/// Stones in a line needed to win.
pub const WIN_LENGTH: usize = 5;

/// Gomoku rules: free placement, first line of five wins.
///
/// Placement never changes other cells, so there is no extra state and
/// undo only has to clear the last stone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gomoku;

impl Gomoku {
    /// Returns the longest line through `point` made of `color` stones,
    /// counting the stone at `point` itself.
    pub fn line_length(board: &Board, point: Point, color: Color) -> usize {
        Direction::AXES
            .into_iter()
            .map(|axis| {
                1 + Self::run(board, point, axis, color)
                    + Self::run(board, point, axis.reverse(), color)
            })
            .max()
            .unwrap_or(1)
    }

    /// Contiguous `color` stones walking outward from `point`, excluding `point`.
    fn run(board: &Board, point: Point, direction: Direction, color: Color) -> usize {
        let mut count = 0;
        let mut cur = point.step(direction, board.size());
        while let Some(p) = cur {
            if board.color_at(p) != Some(color) {
                break;
            }
            count += 1;
            cur = p.step(direction, board.size());
        }
        count
    }
}

impl RuleSet for Gomoku {
    fn variant(&self) -> Variant {
        Variant::Gomoku
    }

    fn play(&mut self, state: &mut GameState, point: Point) -> Result<(), GameError> {
        let mover = state.to_move;
        state.board.place(point, mover)?;
        state.history.push(Move::place(point, mover), &state.board)?;
        tracing::debug!("{} plays {}", mover, point);

        if Self::line_length(&state.board, point, mover) >= WIN_LENGTH {
            state.finish(GameResult::Win {
                winner: mover,
                reason: WinReason::FiveInARow,
            });
        } else if state.board.is_full() {
            state.finish(GameResult::Draw(DrawReason::BoardFull));
        } else {
            state.to_move = mover.opposite();
        }
        Ok(())
    }

    fn undo(&mut self, state: &mut GameState) -> Result<Move, GameError> {
        let last = state.history.pop().ok_or(GameError::NoMoveToUndo)?;
        if let Some(point) = last.point() {
            state.board.remove(point);
        }
        state.to_move = last.color();
        state.result = None;
        tracing::debug!("Undid {}", last);
        Ok(last)
    }

    fn is_legal(&self, state: &GameState, point: Point) -> bool {
        state.board.is_empty(point)
    }

    fn reset(&mut self) {}
}
