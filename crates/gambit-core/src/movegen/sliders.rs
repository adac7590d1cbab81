//! Ray-walking move generation for bishops, rooks and queens.

use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::position::{Position, Side};

use super::MoveList;

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Walk each direction from every `kind` piece of `side` until the edge or
/// the first blocker. An enemy blocker is a capture; a friendly one stops the
/// ray short.
pub(super) fn gen_sliders(
    pos: &Position,
    side: Side,
    kind: PieceKind,
    directions: &[(i8, i8); 4],
    list: &mut MoveList,
) {
    let friendly = pos.side(side);
    let enemy = pos.side(side.flip());

    for src in pos.pieces(side, kind) {
        for &(df, dr) in directions {
            let mut cursor = src.offset(df, dr);
            while let Some(dst) = cursor {
                if friendly.contains(dst) {
                    break;
                }
                if enemy.contains(dst) {
                    list.push(Move::capture(src, dst, kind));
                    break;
                }
                list.push(Move::quiet(src, dst, kind));
                cursor = dst.offset(df, dr);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::movegen::generate_moves;
    use crate::position::{Position, Side};
    use crate::square::Square;

    #[test]
    fn rook_stops_at_blockers() {
        // Rook a1, own pawn a3, enemy knight d1.
        let pos: Position = "7k/8/8/8/8/P7/8/R2n3K w - - 0 1".parse().unwrap();
        let rook: Vec<_> = generate_moves(&pos, Side::Own)
            .into_iter()
            .filter(|mv| mv.from() == Square::A1)
            .collect();
        assert_eq!(rook.len(), 4);
        assert_eq!(rook.iter().filter(|mv| mv.is_capture()).count(), 1);
        assert!(rook.iter().all(|mv| mv.to() != Square::E1));
    }

    #[test]
    fn bishop_blocked_by_own_pawns_at_start() {
        let pos = Position::starting_position();
        assert!(generate_moves(&pos, Side::Own)
            .into_iter()
            .all(|mv| mv.from() != Square::C1 && mv.from() != Square::F1));
    }
}
