//! The packed auxiliary word carried by every position.
//!
//! ```text
//! bits  0-5:  from-square of the move that produced the position
//! bits  6-11: to-square of that move
//! bit   12:   set when the from/to fields are meaningful
//! bits 16-19: castling rights, one bit per corner (a1, h1, a8, h8)
//! ```

use crate::chess_move::MoveKey;
use crate::square::Square;

const FROM_MASK: u64 = 0x003F;
const TO_MASK: u64 = 0x0FC0;
const TO_SHIFT: u32 = 6;
const HAS_MOVE: u64 = 1 << 12;
const CASTLE_MASK: u64 = 0xF << CASTLE_SHIFT;
const CASTLE_SHIFT: u32 = 16;

/// Castling rights keyed by the rook corner they belong to.
///
/// Rights are only tracked: castling moves are never generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0001);
    pub const WHITE_KING: CastleRights = CastleRights(0b0010);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b0100);
    pub const BLACK_KING: CastleRights = CastleRights(0b1000);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Rights lost when a move starts or ends on `sq`.
    pub const fn revoked_by(sq: Square) -> CastleRights {
        match sq.index() {
            0 => Self::WHITE_QUEEN,
            7 => Self::WHITE_KING,
            4 => CastleRights(Self::WHITE_QUEEN.0 | Self::WHITE_KING.0),
            56 => Self::BLACK_QUEEN,
            63 => Self::BLACK_KING,
            60 => CastleRights(Self::BLACK_QUEEN.0 | Self::BLACK_KING.0),
            _ => Self::NONE,
        }
    }

    /// Parse the FEN castling field (`"KQkq"`, `"-"`, ...).
    pub fn from_fen(field: &str) -> Option<CastleRights> {
        if field == "-" {
            return Some(Self::NONE);
        }
        let mut rights = Self::NONE;
        for c in field.chars() {
            rights = rights.insert(match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return None,
            });
        }
        Some(rights)
    }

    /// Vertical mirror: white corners trade places with black ones.
    pub const fn flip_colors(self) -> CastleRights {
        CastleRights(((self.0 & 0b0011) << 2) | ((self.0 & 0b1100) >> 2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Aux(u64);

impl Aux {
    pub const EMPTY: Aux = Aux(0);

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// The move that produced this position, if recorded.
    #[inline]
    pub const fn last_move(self) -> Option<MoveKey> {
        if self.0 & HAS_MOVE == 0 {
            return None;
        }
        let from = Square::from_index_unchecked((self.0 & FROM_MASK) as u8);
        let to = Square::from_index_unchecked(((self.0 & TO_MASK) >> TO_SHIFT) as u8);
        Some(MoveKey::new(from, to))
    }

    #[inline]
    pub const fn with_last_move(self, key: MoveKey) -> Aux {
        let cleared = self.0 & !(FROM_MASK | TO_MASK);
        Aux(cleared | HAS_MOVE | key.from.index() as u64 | ((key.to.index() as u64) << TO_SHIFT))
    }

    #[inline]
    pub const fn castling(self) -> CastleRights {
        CastleRights(((self.0 & CASTLE_MASK) >> CASTLE_SHIFT) as u8)
    }

    #[inline]
    pub const fn with_castling(self, rights: CastleRights) -> Aux {
        Aux((self.0 & !CASTLE_MASK) | ((rights.0 as u64) << CASTLE_SHIFT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_move_roundtrip() {
        assert_eq!(Aux::EMPTY.last_move(), None);
        let key = MoveKey::new(Square::E2, Square::E4);
        let aux = Aux::EMPTY.with_castling(CastleRights::ALL).with_last_move(key);
        assert_eq!(aux.last_move(), Some(key));
        assert_eq!(aux.castling(), CastleRights::ALL);
    }

    #[test]
    fn overwriting_last_move_keeps_castling() {
        let aux = Aux::EMPTY
            .with_castling(CastleRights::WHITE_KING)
            .with_last_move(MoveKey::new(Square::H8, Square::A1))
            .with_last_move(MoveKey::new(Square::B1, Square::C3));
        assert_eq!(aux.last_move(), Some(MoveKey::new(Square::B1, Square::C3)));
        assert_eq!(aux.castling(), CastleRights::WHITE_KING);
    }

    #[test]
    fn king_square_revokes_both_sides() {
        let left = CastleRights::ALL.remove(CastleRights::revoked_by(Square::E1));
        assert_eq!(left, CastleRights::BLACK_KING.insert(CastleRights::BLACK_QUEEN));
        assert_eq!(CastleRights::revoked_by(Square::D4), CastleRights::NONE);
    }

    #[test]
    fn fen_field() {
        assert_eq!(CastleRights::from_fen("KQkq"), Some(CastleRights::ALL));
        assert_eq!(CastleRights::from_fen("-"), Some(CastleRights::NONE));
        assert_eq!(CastleRights::from_fen("Kx"), None);
    }

    #[test]
    fn flip_colors_swaps_sides() {
        assert_eq!(CastleRights::WHITE_KING.flip_colors(), CastleRights::BLACK_KING);
        assert_eq!(CastleRights::BLACK_QUEEN.flip_colors(), CastleRights::WHITE_QUEEN);
    }
}
