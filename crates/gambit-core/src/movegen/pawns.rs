//! Pawn pushes, captures, en passant and queen promotion.

use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::position::{Position, Side};

use super::MoveList;

pub(super) fn gen_pawns(pos: &Position, side: Side, list: &mut MoveList) {
    let color = pos.color_of(side);
    let forward = color.forward();
    let enemy = pos.side(side.flip());
    let occupied = pos.occupied();
    let promotion_rank = color.promotion_rank();
    let en_passant = match side {
        Side::Own => pos.en_passant_square(),
        Side::Opp => None,
    };

    let finish = |mv: Move| {
        if promotion_rank.contains(mv.to()) { mv.promoting() } else { mv }
    };

    for src in pos.pieces(side, PieceKind::Pawn) {
        let single = src.offset(0, forward).filter(|&one| !occupied.contains(one));
        if let Some(one) = single {
            list.push(finish(Move::quiet(src, one, PieceKind::Pawn)));

            if color.pawn_start_rank().contains(src) {
                let double = one.offset(0, forward).filter(|&two| !occupied.contains(two));
                if let Some(two) = double {
                    list.push(Move::quiet(src, two, PieceKind::Pawn));
                }
            }
        }

        for file_delta in [-1, 1] {
            let Some(dst) = src.offset(file_delta, forward) else {
                continue;
            };
            if enemy.contains(dst) || en_passant == Some(dst) {
                list.push(finish(Move::capture(src, dst, PieceKind::Pawn)));
            }
        }
    }
}
