//! Mobility: pseudo-legal move count difference.

use gambit_core::{Position, Side, generate_moves};

/// Own pseudo-legal moves minus opponent pseudo-legal moves.
pub fn mobility(pos: &Position) -> i32 {
    let own = generate_moves(pos, Side::Own).len() as i32;
    let opp = generate_moves(pos, Side::Opp).len() as i32;
    own - opp
}
