//! Chess position model: relative-perspective bitboards, move generation,
//! attack detection, FEN parsing and game snapshot import.

mod attack;
mod auxiliary;
mod bitboard;
mod chess_move;
mod color;
mod error;
mod fen;
mod movegen;
mod piece_kind;
mod position;
mod snapshot;
mod square;

pub use attack::{in_check, is_legal, is_square_attacked};
pub use auxiliary::{Aux, CastleRights};
pub use bitboard::Bitboard;
pub use chess_move::{Move, MoveKey};
pub use color::Color;
pub use error::{FenError, PositionError, SnapshotError};
pub use fen::STARTING_FEN;
pub use movegen::{MoveList, generate_moves, legal_captures, legal_moves, perft};
pub use piece_kind::PieceKind;
pub use position::{BoardKey, Position, Side};
pub use snapshot::{GameSnapshot, HistoryEntry, LINEAGE_PLIES, PieceEntry};
pub use square::Square;
