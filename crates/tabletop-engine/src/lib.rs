//! Rule engine for Gomoku, Go and Reversi.
//!
//! This crate provides:
//! - [`Board`] - square grid of stones, 8x8 up to 19x19
//! - [`Game`] - one game session with history, undo and result tracking
//! - [`RuleSet`] - trait implemented once per game, dispatched through [`Rules`]
//! - [`SavedGame`] - versioned JSON save format
//! - [`SessionConfig`] - TOML session settings
//!
//! # Architecture
//!
//! A [`Game`] owns a [`GameState`] (board, side to move, history, result)
//! and a [`Rules`] value holding the active rule module and whatever that
//! game needs beyond the board: Go keeps earlier positions for its
//! repetition check and its capture counters, Reversi keeps the runs each
//! move flipped. Moves are validated before anything is changed, so a
//! rejected move leaves the session as it was.
//!
//! # Example
//!
//! ```
//! use tabletop_core::Point;
//! use tabletop_engine::{Game, Variant};
//!
//! let mut game = Game::new(Variant::Reversi, 8).unwrap();
//! println!("Legal openings: {:?}", game.legal_moves());
//! game.play(Point::new(2, 3)).unwrap();
//! println!("{}", game.board());
//! ```

mod board;
pub mod config;
mod game;
mod history;
pub mod rules;
mod save;
mod state;
mod zobrist;

pub use board::{Board, BoardError, MAX_SIZE, MIN_SIZE};
pub use config::{ConfigError, SessionConfig};
pub use game::{Game, GameError};
pub use history::MoveHistory;
pub use rules::{DrawReason, GameResult, RuleSet, Rules, Score, Variant, WinReason};
pub use save::{SaveError, SavedGame, SavedState, FORMAT_VERSION};
pub use state::GameState;
