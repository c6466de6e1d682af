//! Ordered record of applied moves.

use serde::{Deserialize, Serialize};
use tabletop_core::Move;

use crate::board::{Board, BoardError};

/// Moves in play order. Appended on a successful play, popped on undo,
/// never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move, rejecting placements outside `board`.
    pub fn push(&mut self, mov: Move, board: &Board) -> Result<(), BoardError> {
        if let Some(point) = mov.point() {
            if !board.contains(point) {
                return Err(BoardError::OutOfBounds(point));
            }
        }
        self.moves.push(mov);
        Ok(())
    }

    /// Removes and returns the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Returns the most recent move.
    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    /// Number of trailing consecutive passes.
    pub fn trailing_passes(&self) -> usize {
        self.moves.iter().rev().take_while(|m| m.is_pass()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::{Color, Point};

    #[test]
    fn push_pop_in_order() {
        let board = Board::new(9).unwrap();
        let mut history = MoveHistory::new();
        let first = Move::place(Point::new(0, 0), Color::Black);
        let second = Move::pass(Color::White);
        history.push(first, &board).unwrap();
        history.push(second, &board).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.as_slice(), &[first, second]);
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.last(), Some(first));
    }

    #[test]
    fn push_rejects_off_board_point() {
        let board = Board::new(8).unwrap();
        let mut history = MoveHistory::new();
        let off = Point::new(3, 8);
        assert_eq!(
            history.push(Move::place(off, Color::Black), &board),
            Err(BoardError::OutOfBounds(off))
        );
        assert!(history.is_empty());
    }

    #[test]
    fn trailing_passes() {
        let board = Board::new(8).unwrap();
        let mut history = MoveHistory::new();
        assert_eq!(history.trailing_passes(), 0);
        history.push(Move::pass(Color::Black), &board).unwrap();
        history
            .push(Move::place(Point::new(1, 1), Color::White), &board)
            .unwrap();
        history.push(Move::pass(Color::Black), &board).unwrap();
        assert_eq!(history.trailing_passes(), 1);
        history.push(Move::pass(Color::White), &board).unwrap();
        assert_eq!(history.trailing_passes(), 2);
    }
}
