//! Fields shared by every variant.

use tabletop_core::Color;

use crate::board::Board;
use crate::history::MoveHistory;
use crate::rules::GameResult;

/// Board, side to move, move history and result.
///
/// Variant-specific state (Go snapshots and captures, Reversi flip
/// records) lives in the rule module, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub to_move: Color,
    pub history: MoveHistory,
    pub result: Option<GameResult>,
}

impl GameState {
    /// A fresh state on `board` with Black to move.
    pub fn new(board: Board) -> Self {
        GameState {
            board,
            to_move: Color::Black,
            history: MoveHistory::new(),
            result: None,
        }
    }

    /// Returns true once a result has been recorded.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Records a result and logs it.
    pub(crate) fn finish(&mut self, result: GameResult) {
        tracing::info!("Game finished after {} moves: {}", self.history.len(), result);
        self.result = Some(result);
    }
}
