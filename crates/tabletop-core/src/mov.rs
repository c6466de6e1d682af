//! Move representation.

use crate::{Color, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded move: a stone placement, or a pass.
///
/// Moves are immutable once recorded. Passes only occur in Go; the other
/// variants reject them before anything is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    /// A stone of `color` placed at `point`.
    Place { point: Point, color: Color },
    /// `color` declined to place a stone.
    Pass { color: Color },
}

impl Move {
    /// Creates a placement.
    #[inline]
    pub const fn place(point: Point, color: Color) -> Self {
        Move::Place { point, color }
    }

    /// Creates a pass marker.
    #[inline]
    pub const fn pass(color: Color) -> Self {
        Move::Pass { color }
    }

    /// Returns the player who made the move.
    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Move::Place { color, .. } | Move::Pass { color } => color,
        }
    }

    /// Returns the placed point, or `None` for a pass.
    #[inline]
    pub const fn point(self) -> Option<Point> {
        match self {
            Move::Place { point, .. } => Some(point),
            Move::Pass { .. } => None,
        }
    }

    /// Returns true if this is a pass marker.
    #[inline]
    pub const fn is_pass(self) -> bool {
        matches!(self, Move::Pass { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { point, color } => write!(f, "{} {}", color, point),
            Move::Pass { color } => write!(f, "{} pass", color),
        }
    }
}
