//! Material balance.

use gambit_core::{PieceKind, Position, Side};

/// Weighted piece count difference, own minus opponent.
///
/// `values` is indexed by [`PieceKind::index()`]. Kings are included so a
/// configuration can weight them, although a playable position always has
/// one per side and they cancel.
pub fn material(pos: &Position, values: &[i32; PieceKind::COUNT]) -> i32 {
    PieceKind::ALL
        .into_iter()
        .map(|kind| {
            let own = pos.pieces(Side::Own, kind).count() as i32;
            let opp = pos.pieces(Side::Opp, kind).count() as i32;
            values[kind.index()] * (own - opp)
        })
        .sum()
}
