//! Knight and king move generation from fixed offset tables.

use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::position::{Position, Side};

use super::MoveList;

/// (file, rank) steps of a knight.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

/// (file, rank) steps of a king.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] =
    [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// Generate single-step moves for every `kind` piece of `side`.
pub(super) fn gen_leapers(
    pos: &Position,
    side: Side,
    kind: PieceKind,
    offsets: &[(i8, i8); 8],
    list: &mut MoveList,
) {
    let friendly = pos.side(side);
    let enemy = pos.side(side.flip());

    for src in pos.pieces(side, kind) {
        for &(df, dr) in offsets {
            let Some(dst) = src.offset(df, dr) else {
                continue;
            };
            if friendly.contains(dst) {
                continue;
            }
            if enemy.contains(dst) {
                list.push(Move::capture(src, dst, kind));
            } else {
                list.push(Move::quiet(src, dst, kind));
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
    fn corner_knight_has_two_moves() {
        let pos: Position = "7k/8/8/8/8/8/8/N6K w - - 0 1".parse().unwrap();
        let from_a1 = generate_moves(&pos, Side::Own)
            .into_iter()
            .filter(|mv| mv.from() == Square::A1)
            .count();
        assert_eq!(from_a1, 2);
    }

    #[test]
    fn knight_on_h_file_does_not_wrap() {
        let pos: Position = "k7/8/8/8/7N/8/8/K7 w - - 0 1".parse().unwrap();
        let targets: Vec<_> = generate_moves(&pos, Side::Own)
            .into_iter()
            .filter(|mv| mv.from() == Square::H4)
            .map(|mv| mv.to())
            .collect();
        assert_eq!(targets.len(), 4);
        assert!(targets.iter().all(|sq| sq.file() >= 5));
    }

    #[test]
    fn king_captures_but_skips_friendly() {
        let pos: Position = "k7/8/8/8/8/8/3pP3/4K3 w - - 0 1".parse().unwrap();
        let king: Vec<_> = generate_moves(&pos, Side::Own)
            .into_iter()
            .filter(|mv| mv.from() == Square::E1)
            .collect();
        assert_eq!(king.len(), 4);
        assert!(king.iter().all(|mv| mv.to() != Square::E2));
        assert!(king.iter().any(|mv| mv.to() == Square::D2 && mv.is_capture()));
    }
}
