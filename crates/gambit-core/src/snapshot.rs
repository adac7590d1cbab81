//! Import of a game snapshot handed over by the turn shell.
//!
//! The shell describes the board as piece lists and the game so far as a list
//! of from/to moves. Piece kinds arrive as names ("Pawn", "Knight", ...).

use tracing::debug;

use crate::auxiliary::{Aux, CastleRights};
use crate::chess_move::MoveKey;
use crate::color::Color;
use crate::error::SnapshotError;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Number of prior plies carried into the repetition lineage.
pub const LINEAGE_PLIES: usize = 7;

/// One piece on the board, located by file letter and one-based rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceEntry {
    pub kind: String,
    pub file: char,
    pub rank: u8,
}

impl PieceEntry {
    pub fn new(kind: impl Into<String>, file: char, rank: u8) -> PieceEntry {
        PieceEntry { kind: kind.into(), file, rank }
    }

    fn square(&self) -> Result<Square, SnapshotError> {
        square_at(self.file, self.rank)
    }
}

/// One move of the game record, oldest first in [`GameSnapshot::history`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub from_file: char,
    pub from_rank: u8,
    pub to_file: char,
    pub to_rank: u8,
    pub kind: String,
}

impl HistoryEntry {
    /// Parse a coordinate move such as `"e2e4"`, tagged with the moving kind.
    pub fn from_coords(coords: &str, kind: impl Into<String>) -> Option<HistoryEntry> {
        let (from, to) = (coords.get(..2)?, coords.get(2..)?);
        let from = Square::from_algebraic(from)?;
        let to = Square::from_algebraic(to)?;
        Some(HistoryEntry {
            from_file: from.file_char(),
            from_rank: from.rank() + 1,
            to_file: to.file_char(),
            to_rank: to.rank() + 1,
            kind: kind.into(),
        })
    }

    pub fn key(&self) -> Result<MoveKey, SnapshotError> {
        Ok(MoveKey::new(
            square_at(self.from_file, self.from_rank)?,
            square_at(self.to_file, self.to_rank)?,
        ))
    }
}

/// Everything the engine receives at the start of its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub to_move: Color,
    pub own_pieces: Vec<PieceEntry>,
    pub opp_pieces: Vec<PieceEntry>,
    pub history: Vec<HistoryEntry>,
    pub time_remaining_ns: u64,
    /// Only read by an endgame tablebase probe.
    pub fen: String,
}

impl GameSnapshot {
    /// Build the root position and the lineage of up to [`LINEAGE_PLIES`]
    /// prior moves, oldest first.
    ///
    /// Castling rights start full and are lost for every king or corner
    /// square the history touches. The last history move becomes the
    /// position's last move, which is where en passant is read from.
    pub fn root(&self) -> Result<(Position, Vec<MoveKey>), SnapshotError> {
        let keys = self
            .history
            .iter()
            .map(HistoryEntry::key)
            .collect::<Result<Vec<_>, _>>()?;

        let castling = keys.iter().fold(CastleRights::ALL, |rights, key| {
            rights
                .remove(CastleRights::revoked_by(key.from))
                .remove(CastleRights::revoked_by(key.to))
        });
        let mut aux = Aux::EMPTY.with_castling(castling);
        if let Some(&last) = keys.last() {
            aux = aux.with_last_move(last);
        }

        let them = self.to_move.flip();
        let mut placements = Vec::with_capacity(self.own_pieces.len() + self.opp_pieces.len());
        for (color, entries) in [(self.to_move, &self.own_pieces), (them, &self.opp_pieces)] {
            for entry in entries {
                let kind = PieceKind::from_name(&entry.kind)
                    .ok_or_else(|| SnapshotError::UnknownPieceType { name: entry.kind.clone() })?;
                placements.push((color, kind, entry.square()?));
            }
        }

        let position = Position::from_placements(self.to_move, placements, aux)?;
        position.validate()?;

        let start = keys.len().saturating_sub(LINEAGE_PLIES);
        debug!(
            pieces = position.piece_count(),
            history = keys.len(),
            castling = castling.bits(),
            "imported snapshot"
        );
        Ok((position, keys[start..].to_vec()))
    }

    /// Total number of pieces listed for both sides.
    pub fn piece_count(&self) -> usize {
        self.own_pieces.len() + self.opp_pieces.len()
    }
}

fn square_at(file: char, rank: u8) -> Result<Square, SnapshotError> {
    Square::from_file_rank(file, rank).ok_or(SnapshotError::InvalidSquare { file, rank })
}
