//! Side colours.

use std::fmt;
use std::ops::Not;

use crate::bitboard::Bitboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank that this side's pawns start on (double pushes allowed).
    #[inline]
    pub const fn pawn_start_rank(self) -> Bitboard {
        match self {
            Color::White => Bitboard::RANK_2,
            Color::Black => Bitboard::RANK_7,
        }
    }

    /// Rank on which this side's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> Bitboard {
        match self {
            Color::White => Bitboard::RANK_8,
            Color::Black => Bitboard::RANK_1,
        }
    }

    /// Parse the shell's colour names (`"White"`, `"Black"`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Color> {
        if name.eq_ignore_ascii_case("white") {
            Some(Color::White)
        } else if name.eq_ignore_ascii_case("black") {
            Some(Color::Black)
        } else {
            None
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_and_not() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(Color::Black.flip().flip(), Color::Black);
    }

    #[test]
    fn names() {
        assert_eq!(Color::from_name("White"), Some(Color::White));
        assert_eq!(Color::from_name("black"), Some(Color::Black));
        assert_eq!(Color::from_name("red"), None);
        assert_eq!(Color::White.to_string(), "White");
    }
}
