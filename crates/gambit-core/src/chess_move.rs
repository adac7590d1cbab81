//! Candidate moves and the from/to keys used for repetition tracking.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A move reduced to its origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveKey {
    pub from: Square,
    pub to: Square,
}

impl MoveKey {
    #[inline]
    pub const fn new(from: Square, to: Square) -> MoveKey {
        MoveKey { from, to }
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A pseudo-legal candidate produced by move generation.
///
/// Promotions are always to a queen, so the flag is enough to describe one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: PieceKind,
    promotion: bool,
    capture: bool,
}

impl Move {
    /// A non-capturing move.
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: PieceKind) -> Move {
        Move { from, to, piece, promotion: false, capture: false }
    }

    /// A move onto an opponent piece (or onto the en-passant square).
    #[inline]
    pub const fn capture(from: Square, to: Square, piece: PieceKind) -> Move {
        Move { from, to, piece, promotion: false, capture: true }
    }

    /// Mark this move as a pawn reaching the last rank.
    #[inline]
    pub const fn promoting(self) -> Move {
        Move { promotion: true, ..self }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Kind of the piece being moved.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.capture
    }

    /// The piece standing on the destination after the move.
    #[inline]
    pub const fn landing_piece(self) -> PieceKind {
        if self.promotion { PieceKind::Queen } else { self.piece }
    }

    #[inline]
    pub const fn key(self) -> MoveKey {
        MoveKey::new(self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.promotion {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {self})", self.piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_lands_a_queen() {
        let mv = Move::quiet(Square::A7, Square::A8, PieceKind::Pawn).promoting();
        assert!(mv.is_promotion());
        assert_eq!(mv.landing_piece(), PieceKind::Queen);
        assert_eq!(mv.to_string(), "a7a8q");
    }

    #[test]
    fn key_drops_everything_but_squares() {
        let a = Move::capture(Square::E4, Square::D5, PieceKind::Pawn);
        let b = Move::quiet(Square::E4, Square::D5, PieceKind::Queen);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().to_string(), "e4d5");
    }
}
