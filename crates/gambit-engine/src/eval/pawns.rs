//! Pawn structure faults: blocked, doubled and isolated pawns.

use gambit_core::{Bitboard, PieceKind, Position, Side};

/// For each file index 0-7, the bitboard of the adjacent files.
static ADJACENT_FILES: [Bitboard; 8] = compute_adjacent_files();

const fn compute_adjacent_files() -> [Bitboard; 8] {
    let mut table = [Bitboard::EMPTY; 8];
    let mut f = 0usize;
    while f < 8 {
        let mut bits = 0u64;
        if f > 0 {
            bits |= Bitboard::FILES[f - 1].inner();
        }
        if f < 7 {
            bits |= Bitboard::FILES[f + 1].inner();
        }
        table[f] = Bitboard::new(bits);
        f += 1;
    }
    table
}

/// Count pawn faults for one side. A pawn can score up to three: blocked
/// (the square ahead holds any piece), doubled (another friendly pawn on its
/// file) and isolated (no friendly pawn on an adjacent file).
pub fn pawn_faults(pos: &Position, side: Side) -> i32 {
    let pawns = pos.pieces(side, PieceKind::Pawn);
    let occupied = pos.occupied();
    let forward = pos.color_of(side).forward();

    let mut faults = 0;
    for sq in pawns {
        let file = sq.file() as usize;
        if sq.offset(0, forward).is_some_and(|ahead| occupied.contains(ahead)) {
            faults += 1;
        }
        if (pawns & Bitboard::FILES[file]).without(sq).is_nonempty() {
            faults += 1;
        }
        if (pawns & ADJACENT_FILES[file]).is_empty() {
            faults += 1;
        }
    }
    faults
}

/// Pawn structure term, own perspective: own faults cost `penalty` each and
/// opponent faults earn it.
pub fn pawn_structure(pos: &Position, penalty: i32) -> i32 {
    penalty * (pawn_faults(pos, Side::Opp) - pawn_faults(pos, Side::Own))
}

#[cfg(test)]
mod tests {
    use gambit_core::{Position, Side};

    use super::{pawn_faults, pawn_structure};

    #[test]
    fn starting_position_has_no_faults() {
        let pos = Position::starting_position();
        assert_eq!(pawn_faults(&pos, Side::Own), 0);
        assert_eq!(pawn_faults(&pos, Side::Opp), 0);
    }

    #[test]
    fn lone_pawn_is_isolated() {
        let pos: Position = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(pawn_faults(&pos, Side::Own), 1);
        assert_eq!(pawn_structure(&pos, 15), -15);
    }

    #[test]
    fn doubled_and_blocked() {
        // e2/e3 doubled, e3 blocked by the black pawn on e4, d2 keeps them connected.
        let pos: Position = "4k3/8/8/8/4p3/4P3/3PP3/4K3 w - - 0 1".parse().unwrap();
        // e3: blocked + doubled, e2: blocked (e3) + doubled, d2: none.
        assert_eq!(pawn_faults(&pos, Side::Own), 4);
        // e4: blocked by e3, isolated.
        assert_eq!(pawn_faults(&pos, Side::Opp), 2);
    }

    #[test]
    fn black_pawns_look_down_the_board() {
        let pos: Position = "4k3/4p3/4N3/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        // e7 blocked by the knight on e6 and isolated.
        assert_eq!(pawn_faults(&pos, Side::Own), 2);
    }
}
