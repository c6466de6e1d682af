//! Board notation parsing and serialization.
//!
//! A board is written row by row, top row first. Each row holds one
//! character per cell: `.` for empty, `X` for Black and `O` for White
//! (`B`/`W` are accepted when parsing). Rows are separated by `/` or by
//! line breaks, so both of these describe the same position:
//!
//! ```text
//! ..X/.OX/...
//! ```
//!
//! ```text
//! ..X
//! .OX
//! ...
//! ```

use crate::Color;
use thiserror::Error;

/// Errors that can occur when parsing board notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty board notation")]
    Empty,

    #[error("board is not square: {rows} rows but row {row} has {len} cells")]
    NotSquare { rows: usize, row: usize, len: usize },

    #[error("invalid character '{ch}' in row {row}")]
    InvalidCharacter { ch: char, row: usize },

    #[error("board side {0} exceeds the largest representable board")]
    TooLarge(usize),
}

/// Parsed board notation: a square grid of optional stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNotation {
    /// Side length of the grid.
    pub size: u8,
    /// Row-major cells, `size * size` entries.
    pub cells: Vec<Option<Color>>,
}

impl BoardNotation {
    /// Character used for an empty cell.
    pub const EMPTY: char = '.';

    /// Parses board notation.
    pub fn parse(text: &str) -> Result<Self, NotationError> {
        let rows: Vec<&str> = text
            .split(|c: char| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(NotationError::Empty);
        }
        let size = u8::try_from(rows.len()).map_err(|_| NotationError::TooLarge(rows.len()))?;

        let mut cells = Vec::with_capacity(rows.len() * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != rows.len() {
                return Err(NotationError::NotSquare {
                    rows: rows.len(),
                    row: row_idx,
                    len,
                });
            }
            for ch in row.chars() {
                if ch == Self::EMPTY {
                    cells.push(None);
                } else if let Some(color) = Color::from_char(ch) {
                    cells.push(Some(color));
                } else {
                    return Err(NotationError::InvalidCharacter { ch, row: row_idx });
                }
            }
        }

        Ok(BoardNotation { size, cells })
    }

    /// Formats a row-major grid as single-line notation.
    pub fn format(size: u8, cells: &[Option<Color>]) -> String {
        let size = size as usize;
        let mut out = String::with_capacity(size * (size + 1));
        for (i, row) in cells.chunks(size).enumerate() {
            if i > 0 {
                out.push('/');
            }
            out.extend(row.iter().map(|cell| match cell {
                Some(color) => color.to_char(),
                None => Self::EMPTY,
            }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_line() {
        let parsed = BoardNotation::parse("..X/.OX/...").unwrap();
        assert_eq!(parsed.size, 3);
        assert_eq!(parsed.cells[2], Some(Color::Black));
        assert_eq!(parsed.cells[4], Some(Color::White));
        assert_eq!(parsed.cells.iter().filter(|c| c.is_none()).count(), 6);
    }

    #[test]
    fn parse_multi_line_matches_single_line() {
        let multi = BoardNotation::parse(
            "
            ..X
            .OX
            ...
            ",
        )
        .unwrap();
        assert_eq!(multi, BoardNotation::parse("..X/.OX/...").unwrap());
    }

    #[test]
    fn parse_accepts_letter_aliases() {
        let parsed = BoardNotation::parse("B./.W").unwrap();
        assert_eq!(parsed.cells, vec![Some(Color::Black), None, None, Some(Color::White)]);
    }

    #[test]
    fn format_roundtrip() {
        let text = "X..O/..../.OX./O..X";
        let parsed = BoardNotation::parse(text).unwrap();
        assert_eq!(BoardNotation::format(parsed.size, &parsed.cells), text);
    }

    #[test]
    fn reject_empty() {
        assert_eq!(BoardNotation::parse(""), Err(NotationError::Empty));
        assert_eq!(BoardNotation::parse(" / \n"), Err(NotationError::Empty));
    }

    #[test]
    fn reject_ragged_rows() {
        assert_eq!(
            BoardNotation::parse("../.../.."),
            Err(NotationError::NotSquare {
                rows: 3,
                row: 0,
                len: 2
            })
        );
    }

    #[test]
    fn reject_bad_character() {
        assert_eq!(
            BoardNotation::parse("../.Z"),
            Err(NotationError::InvalidCharacter { ch: 'Z', row: 1 })
        );
    }
}
