//! Static evaluation.
//!
//! Scores are from the side to move's point of view: positive favours "own".
//! Every term is antisymmetric, so swapping which side is to move negates
//! the total.

pub mod material;
pub mod mobility;
pub mod pawns;
pub mod pst;

use gambit_core::{PieceKind, Position};

use crate::config::EngineConfig;

/// Weighted sum of material, pawn structure, piece-square tables and
/// mobility, with weights copied from an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    values: [i32; PieceKind::COUNT],
    pawn_penalty: i32,
    mobility_weight: i32,
    pst_weight: i32,
}

impl Evaluator {
    pub fn new(config: &EngineConfig) -> Evaluator {
        Evaluator {
            values: PieceKind::ALL.map(|kind| config.piece_value(kind)),
            pawn_penalty: config.pawn_penalty,
            mobility_weight: config.mobility_weight,
            pst_weight: config.pst_weight,
        }
    }

    pub fn evaluate(&self, pos: &Position) -> i32 {
        let mut score = material::material(pos, &self.values);
        score += pawns::pawn_structure(pos, self.pawn_penalty);
        if self.pst_weight != 0 {
            score += pst::pst_balance(pos) * self.pst_weight / 100;
        }
        if self.mobility_weight != 0 {
            score += mobility::mobility(pos) * self.mobility_weight;
        }
        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
