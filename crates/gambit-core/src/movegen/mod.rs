//! Pseudo-legal move generation and the legal-move front end.
//!
//! Generation walks each piece mask with a forward bit scan and emits
//! candidates per piece type. Candidates are filtered for king safety by
//! [`crate::attack`] before they become search nodes.

mod leapers;
mod pawns;
mod sliders;

use crate::attack::is_legal;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::position::{Position, Side};

pub(crate) use leapers::{KING_OFFSETS, KNIGHT_OFFSETS};
pub(crate) use sliders::{DIAGONALS, ORTHOGONALS};

/// Buffer for generated moves.
#[derive(Debug, Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList { moves: Vec::with_capacity(64) }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Keep only the moves matching `keep`.
    pub fn retain<F: FnMut(&Move) -> bool>(&mut self, keep: F) {
        self.moves.retain(keep);
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

/// Generate pseudo-legal moves for `side`.
///
/// Castling is never produced: rights are tracked in the auxiliary word but
/// castling generation is not implemented. En passant is only available to
/// the side to move, since only it can answer the preceding double push.
pub fn generate_moves(pos: &Position, side: Side) -> MoveList {
    let mut list = MoveList::new();
    pawns::gen_pawns(pos, side, &mut list);
    leapers::gen_leapers(pos, side, PieceKind::Knight, &KNIGHT_OFFSETS, &mut list);
    sliders::gen_sliders(pos, side, PieceKind::Bishop, &DIAGONALS, &mut list);
    sliders::gen_sliders(pos, side, PieceKind::Rook, &ORTHOGONALS, &mut list);
    sliders::gen_sliders(pos, side, PieceKind::Queen, &DIAGONALS, &mut list);
    sliders::gen_sliders(pos, side, PieceKind::Queen, &ORTHOGONALS, &mut list);
    leapers::gen_leapers(pos, side, PieceKind::King, &KING_OFFSETS, &mut list);
    list
}

/// Legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut list = generate_moves(pos, Side::Own);
    list.retain(|&mv| is_legal(pos, mv));
    list
}

/// Legal captures for the side to move, the frontier of quiescence search.
pub fn legal_captures(pos: &Position) -> MoveList {
    let mut list = generate_moves(pos, Side::Own);
    list.retain(|&mv| mv.is_capture() && is_legal(pos, mv));
    list
}

impl Position {
    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(self)
    }
}

/// Count leaf nodes of the legal move tree to `depth`.
pub fn perft(pos: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.play(mv), depth - 1))
        .sum()
}
