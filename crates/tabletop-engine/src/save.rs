//! Versioned JSON save format for game sessions.
//!
//! A save carries everything needed to continue a game exactly where it
//! stopped, including the variant bookkeeping that the board alone does
//! not show: Go's capture counters, pass counter and earlier positions
//! (so repetition checks keep working), and Reversi's flip log (so undo
//! keeps working).
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "variant": "go",
//!   "size": 9,
//!   "grid": "X......../........./...",
//!   "to_move": "white",
//!   "history": [{ "kind": "place", "point": { "x": 0, "y": 0 }, "color": "black" }],
//!   "result": null,
//!   "state": {
//!     "kind": "go",
//!     "captures": [0, 0],
//!     "consecutive_passes": 0,
//!     "snapshots": ["X......../........./..."]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use tabletop_core::Color;
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::game::{Game, GameError};
use crate::history::MoveHistory;
use crate::rules::{
    FlipRecord, GameResult, Go, Reversi, Rules, Variant, WinReason, REVERSI_SIZE,
};

/// Current save format version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from saving or restoring a game.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Not valid JSON, or not shaped like a save.
    #[error("Invalid save data: {0}")]
    Json(#[from] serde_json::Error),
    /// Written by a format version this build does not read.
    #[error("Unsupported save format version {0}")]
    UnsupportedVersion(u32),
    /// A board grid could not be parsed or has an invalid size.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Replaying the saved history failed.
    #[error(transparent)]
    Game(#[from] GameError),
    /// The fields parse but do not describe one consistent game.
    #[error("Inconsistent save: {0}")]
    Inconsistent(String),
}

/// Serialized form of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub variant: Variant,
    pub size: u8,
    /// Current board in notation form.
    pub grid: String,
    pub to_move: Color,
    pub history: MoveHistory,
    #[serde(default)]
    pub result: Option<GameResult>,
    pub state: SavedState,
}

/// Variant bookkeeping carried by a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SavedState {
    Gomoku,
    Go {
        /// Stones captured by [black, white].
        captures: [u32; 2],
        consecutive_passes: u8,
        /// Position after each placement, oldest first.
        snapshots: Vec<String>,
    },
    Reversi {
        /// Flipped runs of each placement, oldest first.
        flips: Vec<FlipRecord>,
    },
}

impl SavedState {
    fn variant(&self) -> Variant {
        match self {
            SavedState::Gomoku => Variant::Gomoku,
            SavedState::Go { .. } => Variant::Go,
            SavedState::Reversi { .. } => Variant::Reversi,
        }
    }
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl SavedGame {
    /// Captures a snapshot of `game`.
    pub fn from_game(game: &Game) -> Self {
        let state = game.state();
        let saved_state = match game.rules() {
            Rules::Gomoku(_) => SavedState::Gomoku,
            Rules::Go(go) => SavedState::Go {
                captures: go.captures,
                consecutive_passes: go.consecutive_passes,
                snapshots: go.snapshots.iter().map(Board::to_notation).collect(),
            },
            Rules::Reversi(reversi) => SavedState::Reversi {
                flips: reversi.flips.clone(),
            },
        };
        SavedGame {
            version: FORMAT_VERSION,
            variant: game.variant(),
            size: state.board.size(),
            grid: state.board.to_notation(),
            to_move: state.to_move,
            history: state.history.clone(),
            result: state.result,
            state: saved_state,
        }
    }

    /// Rebuilds a session, checking that every field agrees.
    ///
    /// The history is replayed from an empty board and the grid, side to
    /// move, result and variant bookkeeping must all match the replay. The
    /// one field a replay cannot reproduce is a resignation.
    pub fn into_game(self) -> Result<Game, SaveError> {
        if self.version != FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        if self.state.variant() != self.variant {
            return Err(SaveError::Inconsistent(format!(
                "{} save carries {} state",
                self.variant,
                self.state.variant()
            )));
        }
        if self.variant == Variant::Reversi && self.size != REVERSI_SIZE {
            return Err(SaveError::Inconsistent(format!(
                "Reversi is played on an {0}x{0} board, not {1}x{1}",
                REVERSI_SIZE, self.size
            )));
        }
        // Validates the size range before anything else is parsed.
        Board::new(self.size)?;
        let board = Board::from_notation(&self.grid)?;
        if board.size() != self.size {
            return Err(SaveError::Inconsistent(format!(
                "grid is {0}x{0} but size is {1}",
                board.size(),
                self.size
            )));
        }

        let saved_rules = match self.state {
            SavedState::Gomoku => Rules::new(Variant::Gomoku),
            SavedState::Go {
                captures,
                consecutive_passes,
                snapshots,
            } => {
                let snapshots = snapshots
                    .iter()
                    .map(|s| Board::from_notation(s))
                    .collect::<Result<Vec<_>, _>>()?;
                Rules::Go(Go::restore(snapshots, captures, consecutive_passes))
            }
            SavedState::Reversi { flips } => Rules::Reversi(Reversi { flips }),
        };

        let replayed = Game::replay(self.variant, self.size, self.history.as_slice())?;
        let (mut state, rules) = replayed.into_parts();

        if state.board != board {
            return Err(SaveError::Inconsistent(
                "grid does not match the move history".to_string(),
            ));
        }
        if state.to_move != self.to_move {
            return Err(SaveError::Inconsistent(format!(
                "{} to move, but the move history gives {}",
                self.to_move, state.to_move
            )));
        }
        if rules != saved_rules {
            return Err(SaveError::Inconsistent(format!(
                "{} bookkeeping does not match the move history",
                self.variant
            )));
        }
        state.result = check_result(self.result, state.result)?;

        tracing::debug!(
            "Restored {} game after {} moves",
            self.variant,
            state.history.len()
        );
        Ok(Game::from_parts(state, rules))
    }
}

/// Reconciles the saved result with the one the replay reached.
///
/// Resignation is not a move, so it is only accepted on a game the
/// replay left running.
fn check_result(
    saved: Option<GameResult>,
    replayed: Option<GameResult>,
) -> Result<Option<GameResult>, SaveError> {
    match (saved, replayed) {
        (
            Some(GameResult::Win {
                reason: WinReason::Resignation,
                ..
            }),
            None,
        ) => Ok(saved),
        (saved, replayed) if saved == replayed => Ok(saved),
        (saved, replayed) => Err(SaveError::Inconsistent(format!(
            "saved result {:?} but the move history gives {:?}",
            saved, replayed
        ))),
    }
}

impl Game {
    /// Serializes the session to JSON.
    pub fn serialize(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(&SavedGame::from_game(self))?)
    }

    /// Restores a session from JSON written by [`Game::serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::UnsupportedVersion`] for another format version,
    /// [`SaveError::Json`] for malformed input, and
    /// [`SaveError::Inconsistent`] or [`SaveError::Board`] when the fields
    /// do not describe a valid game.
    pub fn deserialize(data: &str) -> Result<Game, SaveError> {
        let probe: VersionProbe = serde_json::from_str(data)?;
        if probe.version != FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(probe.version));
        }
        let saved: SavedGame = serde_json::from_str(data)?;
        saved.into_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::{Move, Point};

    fn saved(game: &Game) -> SavedGame {
        SavedGame::from_game(game)
    }

    #[test]
    fn test_roundtrip_each_variant() {
        let mut gomoku = Game::new(Variant::Gomoku, 15).unwrap();
        gomoku.play(Point::new(7, 7)).unwrap();
        gomoku.play(Point::new(8, 8)).unwrap();

        let mut go = Game::new(Variant::Go, 9).unwrap();
        go.play(Point::new(2, 2)).unwrap();
        go.pass().unwrap();

        let mut reversi = Game::new(Variant::Reversi, 8).unwrap();
        reversi.play(Point::new(2, 3)).unwrap();
        reversi.play(Point::new(2, 2)).unwrap();

        for game in [gomoku, go, reversi] {
            let text = game.serialize().unwrap();
            let restored = Game::deserialize(&text).unwrap();
            assert_eq!(restored, game);
        }
    }

    #[test]
    fn test_restored_reversi_can_undo() {
        let mut game = Game::new(Variant::Reversi, 8).unwrap();
        game.play(Point::new(2, 3)).unwrap();
        let mut restored = Game::deserialize(&game.serialize().unwrap()).unwrap();
        restored.undo().unwrap();
        assert_eq!(restored, Game::new(Variant::Reversi, 8).unwrap());
    }

    #[test]
    fn test_unsupported_version() {
        let game = Game::new(Variant::Go, 9).unwrap();
        let text = game.serialize().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["version"] = serde_json::json!(2);
        match Game::deserialize(&value.to_string()) {
            Err(SaveError::UnsupportedVersion(2)) => {}
            other => panic!("Expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Game::deserialize("{ not json"),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn test_variant_state_mismatch() {
        let mut data = saved(&Game::new(Variant::Go, 9).unwrap());
        data.state = SavedState::Gomoku;
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_grid_size_mismatch() {
        let mut data = saved(&Game::new(Variant::Gomoku, 9).unwrap());
        data.size = 10;
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_bad_grid_character() {
        let mut data = saved(&Game::new(Variant::Gomoku, 8).unwrap());
        data.grid = data.grid.replacen('.', "Z", 1);
        assert!(matches!(data.into_game(), Err(SaveError::Board(_))));
    }

    #[test]
    fn test_grid_must_match_history() {
        let mut game = Game::new(Variant::Go, 9).unwrap();
        game.play(Point::new(4, 4)).unwrap();
        let mut data = saved(&game);
        data.grid = Board::new(9).unwrap().to_notation();
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_reversi_flip_count_mismatch() {
        let mut game = Game::new(Variant::Reversi, 8).unwrap();
        game.play(Point::new(2, 3)).unwrap();
        let mut data = saved(&game);
        data.state = SavedState::Reversi { flips: Vec::new() };
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_resigned_game_roundtrip() {
        let mut game = Game::new(Variant::Gomoku, 9).unwrap();
        game.resign().unwrap();
        let restored = Game::deserialize(&game.serialize().unwrap()).unwrap();
        assert!(restored.is_over());
        assert_eq!(restored.outcome(), game.outcome());
    }

    #[test]
    fn test_reversi_flip_run_length_must_match_history() {
        let mut game = Game::new(Variant::Reversi, 8).unwrap();
        game.play(Point::new(2, 3)).unwrap();
        let mut data = saved(&game);
        match &mut data.state {
            SavedState::Reversi { flips } => flips[0].runs[0].length = 3,
            other => panic!("Expected Reversi state, got {:?}", other),
        }
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_go_snapshots_must_match_history() {
        let mut game = Game::new(Variant::Go, 9).unwrap();
        game.play(Point::new(4, 4)).unwrap();
        let mut data = saved(&game);
        let mut invented = game.board().clone();
        invented.place(Point::new(0, 0), Color::White).unwrap();
        data.state = SavedState::Go {
            captures: [0, 0],
            consecutive_passes: 0,
            snapshots: vec![invented.to_notation()],
        };
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_go_counters_must_match_history() {
        let mut game = Game::new(Variant::Go, 9).unwrap();
        game.play(Point::new(4, 4)).unwrap();
        game.pass().unwrap();
        let mut data = saved(&game);
        if let SavedState::Go { captures, .. } = &mut data.state {
            *captures = [1, 0];
        }
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));

        let mut data = saved(&game);
        if let SavedState::Go {
            consecutive_passes, ..
        } = &mut data.state
        {
            *consecutive_passes = 0;
        }
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_side_to_move_must_match_history() {
        for variant in Variant::ALL {
            let mut data = saved(&Game::new(variant, 9).unwrap());
            data.to_move = Color::White;
            assert!(
                matches!(data.into_game(), Err(SaveError::Inconsistent(_))),
                "{} accepted the wrong side to move",
                variant
            );
        }
    }

    #[test]
    fn test_reversi_size_must_be_eight() {
        let mut data = saved(&Game::new(Variant::Reversi, 8).unwrap());
        data.size = 10;
        data.grid = Board::new(10).unwrap().to_notation();
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_result_must_match_history() {
        let mut game = Game::new(Variant::Gomoku, 9).unwrap();
        game.play(Point::new(4, 4)).unwrap();
        let mut data = saved(&game);
        data.result = Some(GameResult::Win {
            winner: Color::Black,
            reason: WinReason::FiveInARow,
        });
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));

        let mut finished = Game::new(Variant::Go, 9).unwrap();
        finished.pass().unwrap();
        finished.pass().unwrap();
        let mut data = saved(&finished);
        data.result = None;
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));

        // A game the replay already finished cannot also have been resigned.
        let mut data = saved(&finished);
        data.result = Some(GameResult::Win {
            winner: Color::White,
            reason: WinReason::Resignation,
        });
        assert!(matches!(data.into_game(), Err(SaveError::Inconsistent(_))));
    }

    #[test]
    fn test_gomoku_history_with_pass_rejected() {
        let mut data = saved(&Game::new(Variant::Gomoku, 9).unwrap());
        data.history
            .push(Move::pass(Color::Black), &Board::new(9).unwrap())
            .unwrap();
        data.to_move = Color::White;
        assert!(matches!(
            data.into_game(),
            Err(SaveError::Game(GameError::PassNotSupported(Variant::Gomoku)))
        ));
    }
}
