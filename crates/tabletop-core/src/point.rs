//! Board coordinate representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing a [`Point`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid point '{0}': expected two non-negative integers like \"3 4\"")]
pub struct ParsePointError(pub String);

/// A cell coordinate. `x` is the column, `y` the row, both 0-indexed.
///
/// A point carries no board size; bounds are checked by the board it is
/// used against.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    /// Creates a point from column and row.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Point { x, y }
    }

    /// Returns true if the point lies on a `size` x `size` board.
    #[inline]
    pub const fn is_within(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Returns the row-major cell index on a board of the given size.
    #[inline]
    pub const fn index(self, size: u8) -> usize {
        self.y as usize * size as usize + self.x as usize
    }

    /// Inverse of [`Point::index`].
    #[inline]
    pub const fn from_index(index: usize, size: u8) -> Self {
        let size = size as usize;
        Point {
            x: (index % size) as u8,
            y: (index / size) as u8,
        }
    }

    /// Steps one cell in `direction`, returning `None` when leaving the board.
    #[inline]
    pub fn step(self, direction: Direction, size: u8) -> Option<Point> {
        let x = self.x as i16 + direction.dx as i16;
        let y = self.y as i16 + direction.dy as i16;
        if x < 0 || y < 0 || x >= size as i16 || y >= size as i16 {
            None
        } else {
            Some(Point::new(x as u8, y as u8))
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses "x y" or "x,y".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty());
        let x = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let y = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Point::new(x, y))
    }
}

/// A unit step between neighboring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const EAST: Direction = Direction::new(1, 0);
    pub const WEST: Direction = Direction::new(-1, 0);
    pub const SOUTH: Direction = Direction::new(0, 1);
    pub const NORTH: Direction = Direction::new(0, -1);
    pub const SOUTH_EAST: Direction = Direction::new(1, 1);
    pub const NORTH_WEST: Direction = Direction::new(-1, -1);
    pub const NORTH_EAST: Direction = Direction::new(1, -1);
    pub const SOUTH_WEST: Direction = Direction::new(-1, 1);

    /// The four orthogonal directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::WEST,
        Direction::EAST,
        Direction::NORTH,
        Direction::SOUTH,
    ];

    /// All eight compass directions.
    pub const ALL: [Direction; 8] = [
        Direction::NORTH_WEST,
        Direction::WEST,
        Direction::SOUTH_WEST,
        Direction::NORTH,
        Direction::SOUTH,
        Direction::NORTH_EAST,
        Direction::EAST,
        Direction::SOUTH_EAST,
    ];

    /// One representative per line through a cell: horizontal, vertical and both diagonals.
    pub const AXES: [Direction; 4] = [
        Direction::EAST,
        Direction::SOUTH,
        Direction::SOUTH_EAST,
        Direction::NORTH_EAST,
    ];

    #[inline]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Direction { dx, dy }
    }

    /// Returns the direction pointing the other way.
    #[inline]
    pub const fn reverse(self) -> Self {
        Direction::new(-self.dx, -self.dy)
    }
}
