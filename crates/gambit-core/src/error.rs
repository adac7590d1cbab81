//! Error types for position construction, FEN parsing and snapshot import.

use crate::color::Color;

/// Structural problems found while assembling a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Two pieces were placed on the same square.
    #[error("more than one piece on {square}")]
    OverlappingPieces {
        /// Algebraic name of the contested square.
        square: String,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: u32,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling field: \"{found}\"")]
    InvalidCastling { found: String },
    /// The en passant field is malformed or no pawn could have just double-pushed there.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },
    #[error("invalid position: {source}")]
    InvalidPosition {
        #[from]
        source: PositionError,
    },
}

/// Errors raised while importing a game snapshot from the turn shell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A piece or history entry names a square outside a1..h8.
    #[error("square {file}{rank} is off the board")]
    InvalidSquare { file: char, rank: u8 },
    /// A piece type tag is not one of the six known kinds.
    #[error("unknown piece type \"{name}\"")]
    UnknownPieceType { name: String },
    /// The assembled pieces do not form a valid position.
    #[error("invalid position: {source}")]
    InvalidPosition {
        #[from]
        source: PositionError,
    },
}
