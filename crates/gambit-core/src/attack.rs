//! Attack detection against a simulated board and the king-safety filter.
//!
//! Attacks are found by walking outward from the target square rather than
//! from every attacker, so a query costs a handful of ray steps. The board is
//! never mutated: the candidate move is folded into a local occupancy mask.

use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::movegen::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::piece_kind::PieceKind;
use crate::position::{Position, Side};
use crate::square::Square;

/// Board state after a candidate move, as seen by the attack scan.
struct Simulated<'a> {
    pos: &'a Position,
    attacker: Side,
    occupied: Bitboard,
    removed: Bitboard,
}

impl Simulated<'_> {
    #[inline]
    fn attackers(&self, kind: PieceKind) -> Bitboard {
        self.pos.pieces(self.attacker, kind) & !self.removed
    }

    /// First attacker along each ray whose piece is one of `kinds`.
    fn ray_attacker(&self, target: Square, directions: &[(i8, i8); 4], kinds: Bitboard) -> Option<Square> {
        for &(df, dr) in directions {
            let mut cursor = target.offset(df, dr);
            while let Some(sq) = cursor {
                if self.occupied.contains(sq) {
                    if kinds.contains(sq) {
                        return Some(sq);
                    }
                    break;
                }
                cursor = sq.offset(df, dr);
            }
        }
        None
    }

    fn leaper_attacker(&self, target: Square, offsets: &[(i8, i8); 8], kind: PieceKind) -> Option<Square> {
        let pieces = self.attackers(kind);
        offsets
            .iter()
            .filter_map(|&(df, dr)| target.offset(df, dr))
            .find(|&sq| pieces.contains(sq))
    }
}

/// Return the square of a piece of `attacker` that attacks `target` once the
/// other side has moved `moving_from` to `moving_to`.
///
/// The simulation vacates the origin, occupies the destination and removes
/// whatever the move captures, including a pawn taken en passant. Attackers
/// are tried in a fixed order: pawns, diagonal sliders, orthogonal sliders,
/// knights, king. Passing the same square as origin and destination queries
/// the board as it stands.
pub fn is_square_attacked(
    pos: &Position,
    target: Square,
    moving_from: Square,
    moving_to: Square,
    attacker: Side,
) -> Option<Square> {
    let mover = attacker.flip();
    let mut removed = moving_to.bitboard();

    let diagonal_pawn_step = pos.pieces(mover, PieceKind::Pawn).contains(moving_from)
        && moving_from.file() != moving_to.file()
        && !pos.side(attacker).contains(moving_to);
    if diagonal_pawn_step {
        if let Some(passed) = moving_to.offset(0, -pos.color_of(mover).forward()) {
            removed = removed.with(passed);
        }
    }

    let occupied = (pos.occupied() & !removed).without(moving_from).with(moving_to);
    let sim = Simulated { pos, attacker, occupied, removed };

    // A pawn attacks forward, so look one rank behind the target from its side.
    let behind = -pos.color_of(attacker).forward();
    let pawns = sim.attackers(PieceKind::Pawn);
    for df in [-1, 1] {
        if let Some(sq) = target.offset(df, behind) {
            if pawns.contains(sq) {
                return Some(sq);
            }
        }
    }

    let queens = sim.attackers(PieceKind::Queen);
    let diagonal = sim.attackers(PieceKind::Bishop) | queens;
    if let Some(sq) = sim.ray_attacker(target, &DIAGONALS, diagonal) {
        return Some(sq);
    }
    let orthogonal = sim.attackers(PieceKind::Rook) | queens;
    if let Some(sq) = sim.ray_attacker(target, &ORTHOGONALS, orthogonal) {
        return Some(sq);
    }

    sim.leaper_attacker(target, &KNIGHT_OFFSETS, PieceKind::Knight)
        .or_else(|| sim.leaper_attacker(target, &KING_OFFSETS, PieceKind::King))
}

/// `true` when the king of `side` is attacked on the current board. King-less
/// boards are never in check.
pub fn in_check(pos: &Position, side: Side) -> bool {
    match pos.king_square(side) {
        Some(king) => is_square_attacked(pos, king, king, king, side.flip()).is_some(),
        None => false,
    }
}

/// `true` when playing `mv` does not leave the mover's king attacked.
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    let king = if mv.piece() == PieceKind::King {
        Some(mv.to())
    } else {
        pos.king_square(Side::Own)
    };
    match king {
        Some(king) => is_square_attacked(pos, king, mv.from(), mv.to(), Side::Opp).is_none(),
        None => true,
    }
}
