//! Square grid of cells shared by every variant.

use std::fmt;

use tabletop_core::{BoardNotation, Color, Direction, NotationError, Point};
use thiserror::Error;

use crate::zobrist::ZOBRIST;

/// Smallest supported board side.
pub const MIN_SIZE: u8 = 8;

/// Largest supported board side.
pub const MAX_SIZE: u8 = 19;

/// Errors raised by board construction and stone placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be between 8 and 19, got {0}")]
    InvalidSize(u8),

    #[error("point {0} is outside the board")]
    OutOfBounds(Point),

    #[error("point {0} is already occupied")]
    Occupied(Point),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A square board of side `size`; each cell is empty or holds one stone.
///
/// The board knows nothing about game rules. It only enforces that
/// coordinates are in bounds and that stones are not stacked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        let area = size as usize * size as usize;
        Ok(Board {
            size,
            cells: vec![None; area],
        })
    }

    /// Creates a board from [`BoardNotation`] text.
    pub fn from_notation(text: &str) -> Result<Self, BoardError> {
        let parsed = BoardNotation::parse(text)?;
        let mut board = Board::new(parsed.size)?;
        board.cells = parsed.cells;
        Ok(board)
    }

    /// Returns the board as single-line notation.
    pub fn to_notation(&self) -> String {
        BoardNotation::format(self.size, &self.cells)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if `point` lies on this board.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.is_within(self.size)
    }

    /// Returns the stone at `point`, or `None` if the cell is empty or off the board.
    #[inline]
    pub fn color_at(&self, point: Point) -> Option<Color> {
        if self.contains(point) {
            self.cells[point.index(self.size)]
        } else {
            None
        }
    }

    /// Returns true if `point` is on the board and holds no stone.
    #[inline]
    pub fn is_empty(&self, point: Point) -> bool {
        self.contains(point) && self.cells[point.index(self.size)].is_none()
    }

    /// Checks that a stone could be placed at `point`.
    pub fn check_vacant(&self, point: Point) -> Result<(), BoardError> {
        if !self.contains(point) {
            return Err(BoardError::OutOfBounds(point));
        }
        if self.cells[point.index(self.size)].is_some() {
            return Err(BoardError::Occupied(point));
        }
        Ok(())
    }

    /// Places a stone on an empty cell.
    pub fn place(&mut self, point: Point, color: Color) -> Result<(), BoardError> {
        self.check_vacant(point)?;
        self.cells[point.index(self.size)] = Some(color);
        Ok(())
    }

    /// Clears a cell. Off-board points are ignored.
    pub fn remove(&mut self, point: Point) {
        if self.contains(point) {
            self.cells[point.index(self.size)] = None;
        }
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Overwrites a cell, occupied or not. Off-board points are ignored.
    pub(crate) fn set(&mut self, point: Point, cell: Option<Color>) {
        if self.contains(point) {
            self.cells[point.index(self.size)] = cell;
        }
    }

    /// Changes the color of an occupied cell. Empty or off-board cells are left alone.
    pub(crate) fn recolor(&mut self, point: Point, color: Color) {
        if self.contains(point) {
            let cell = &mut self.cells[point.index(self.size)];
            if cell.is_some() {
                *cell = Some(color);
            }
        }
    }

    /// Returns the up to four orthogonally adjacent on-board points.
    ///
    /// Order is west, east, north, south. Never wraps around an edge.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> {
        let size = self.size;
        Direction::ORTHOGONAL
            .into_iter()
            .filter_map(move |d| point.step(d, size))
    }

    /// Iterates every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let size = self.size;
        (0..self.area()).map(move |i| Point::from_index(i, size))
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Row-major cell contents.
    #[inline]
    pub fn cells(&self) -> &[Option<Color>] {
        &self.cells
    }

    /// Zobrist hash of the stone layout.
    pub fn zobrist_hash(&self) -> u64 {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|color| ZOBRIST.stone_key(color, i)))
            .fold(0, |hash, key| hash ^ key)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, "{:>3}", x)?;
        }
        writeln!(f)?;
        for (y, row) in self.cells.chunks(self.size as usize).enumerate() {
            write!(f, "{:>3}", y)?;
            for cell in row {
                let ch = cell.map_or(BoardNotation::EMPTY, Color::to_char);
                write!(f, "{:>3}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
