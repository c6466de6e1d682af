//! Rule set abstraction for the supported games.
//!
//! This module provides the [`RuleSet`] trait, implemented once per game,
//! and the closed [`Rules`] union the [`Game`](crate::Game) session
//! dispatches through. The session owns the shared [`GameState`]; each
//! rule module validates moves against it, mutates it, and keeps its own
//! variant-specific bookkeeping.

mod go;
mod gomoku;
mod reversi;

pub use go::Go;
pub use gomoku::Gomoku;
pub use reversi::{FlipRecord, FlipRun, Reversi, REVERSI_SIZE};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabletop_core::{Color, Move, Point};

use crate::board::Board;
use crate::state::GameState;
use crate::GameError;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// One side won.
    Win { winner: Color, reason: WinReason },
    /// Neither side won.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the winning color, if any.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win { winner, .. } => Some(winner),
            GameResult::Draw(_) => None,
        }
    }

    /// Returns true for a draw.
    pub fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win { winner, reason } => write!(f, "{} wins ({})", winner, reason),
            GameResult::Draw(reason) => write!(f, "draw ({})", reason),
        }
    }
}

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// Five or more stones in a line (Gomoku).
    FiveInARow,
    /// Higher territory plus captures after two passes (Go).
    Score,
    /// More stones on the board when nobody can move (Reversi).
    StoneCount,
    /// The opponent resigned.
    Resignation,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WinReason::FiveInARow => "five in a row",
            WinReason::Score => "score",
            WinReason::StoneCount => "stone count",
            WinReason::Resignation => "resignation",
        })
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// Equal Go scores after two passes.
    EqualScore,
    /// Equal stone counts when nobody can move (Reversi).
    EqualStoneCount,
    /// Gomoku board filled without a line of five.
    BoardFull,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::EqualScore => "equal score",
            DrawReason::EqualStoneCount => "equal stone count",
            DrawReason::BoardFull => "board full",
        })
    }
}

/// Per-color totals: Go score, or Reversi stone counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// Returns the total for `color`.
    pub fn of(self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Higher total wins; equal totals draw.
    pub fn result(self, win: WinReason, draw: DrawReason) -> GameResult {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => GameResult::Win {
                winner: Color::Black,
                reason: win,
            },
            std::cmp::Ordering::Less => GameResult::Win {
                winner: Color::White,
                reason: win,
            },
            std::cmp::Ordering::Equal => GameResult::Draw(draw),
        }
    }
}

/// The supported games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Gomoku,
    Go,
    Reversi,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Gomoku, Variant::Go, Variant::Reversi];

    /// Board size used when none is requested.
    pub const fn default_size(self) -> u8 {
        match self {
            Variant::Gomoku => 15,
            Variant::Go => 19,
            Variant::Reversi => 8,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Gomoku => "gomoku",
            Variant::Go => "go",
            Variant::Reversi => "reversi",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownVariant(s.to_string()))
    }
}

/// Capabilities every game implements.
///
/// Implementations must leave `state` and their own bookkeeping
/// untouched whenever they return an error.
pub trait RuleSet {
    /// Which game this is.
    fn variant(&self) -> Variant;

    /// Board size actually used for a requested (already range-checked) size.
    fn board_size(&self, requested: u8) -> u8 {
        requested
    }

    /// Places the opening stones, if the game has any.
    fn setup(&self, _board: &mut Board) {}

    /// Validates a placement by the side to move and applies it.
    fn play(&mut self, state: &mut GameState, point: Point) -> Result<(), GameError>;

    /// Passes the turn. Only Go supports this.
    fn pass(&mut self, _state: &mut GameState) -> Result<(), GameError> {
        Err(GameError::PassNotSupported(self.variant()))
    }

    /// Reverts the most recent move and returns it.
    fn undo(&mut self, state: &mut GameState) -> Result<Move, GameError>;

    /// Returns true if the side to move may play at `point`.
    fn is_legal(&self, state: &GameState, point: Point) -> bool;

    /// Every point the side to move may play.
    fn legal_moves(&self, state: &GameState) -> Vec<Point> {
        state
            .board
            .points()
            .filter(|&p| self.is_legal(state, p))
            .collect()
    }

    /// Returns true once the game has ended.
    fn is_terminal(&self, state: &GameState) -> bool {
        state.is_over()
    }

    /// Winner, draw, or `None` while the game is running.
    fn outcome(&self, state: &GameState) -> Option<GameResult> {
        state.result
    }

    /// Clears variant bookkeeping for a fresh board.
    fn reset(&mut self);
}

/// Closed union of the rule modules, with the per-variant state they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rules {
    Gomoku(Gomoku),
    Go(Go),
    Reversi(Reversi),
}

impl Rules {
    /// Fresh rules for `variant`.
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Gomoku => Rules::Gomoku(Gomoku),
            Variant::Go => Rules::Go(Go::default()),
            Variant::Reversi => Rules::Reversi(Reversi::default()),
        }
    }
}

impl RuleSet for Rules {
    fn variant(&self) -> Variant {
        match self {
            Rules::Gomoku(r) => r.variant(),
            Rules::Go(r) => r.variant(),
            Rules::Reversi(r) => r.variant(),
        }
    }

    fn board_size(&self, requested: u8) -> u8 {
        match self {
            Rules::Gomoku(r) => r.board_size(requested),
            Rules::Go(r) => r.board_size(requested),
            Rules::Reversi(r) => r.board_size(requested),
        }
    }

    fn setup(&self, board: &mut Board) {
        match self {
            Rules::Gomoku(r) => r.setup(board),
            Rules::Go(r) => r.setup(board),
            Rules::Reversi(r) => r.setup(board),
        }
    }

    fn play(&mut self, state: &mut GameState, point: Point) -> Result<(), GameError> {
        match self {
            Rules::Gomoku(r) => r.play(state, point),
            Rules::Go(r) => r.play(state, point),
            Rules::Reversi(r) => r.play(state, point),
        }
    }

    fn pass(&mut self, state: &mut GameState) -> Result<(), GameError> {
        match self {
            Rules::Gomoku(r) => r.pass(state),
            Rules::Go(r) => r.pass(state),
            Rules::Reversi(r) => r.pass(state),
        }
    }

    fn undo(&mut self, state: &mut GameState) -> Result<Move, GameError> {
        match self {
            Rules::Gomoku(r) => r.undo(state),
            Rules::Go(r) => r.undo(state),
            Rules::Reversi(r) => r.undo(state),
        }
    }

    fn is_legal(&self, state: &GameState, point: Point) -> bool {
        match self {
            Rules::Gomoku(r) => r.is_legal(state, point),
            Rules::Go(r) => r.is_legal(state, point),
            Rules::Reversi(r) => r.is_legal(state, point),
        }
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Point> {
        match self {
            Rules::Gomoku(r) => r.legal_moves(state),
            Rules::Go(r) => r.legal_moves(state),
            Rules::Reversi(r) => r.legal_moves(state),
        }
    }

    fn reset(&mut self) {
        match self {
            Rules::Gomoku(r) => r.reset(),
            Rules::Go(r) => r.reset(),
            Rules::Reversi(r) => r.reset(),
        }
    }
}
