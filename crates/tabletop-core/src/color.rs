//! Stone color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Both colors, in turn order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Returns the index (0 for Black, 1 for White).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the notation character ('X' for Black, 'O' for White).
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }

    /// Parses a notation character. Accepts 'X'/'B' for Black and 'O'/'W' for White.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' | 'B' => Some(Color::Black),
            'O' | 'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn color_index() {
        assert_eq!(Color::Black.index(), 0);
        assert_eq!(Color::White.index(), 1);
    }

    #[test]
    fn notation_chars() {
        assert_eq!(Color::from_char('x'), Some(Color::Black));
        assert_eq!(Color::from_char('B'), Some(Color::Black));
        assert_eq!(Color::from_char('o'), Some(Color::White));
        assert_eq!(Color::from_char('.'), None);
        for color in Color::ALL {
            assert_eq!(Color::from_char(color.to_char()), Some(color));
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::Black), "Black");
        assert_eq!(format!("{}", Color::White), "White");
    }
}
