//! FEN parsing into a [`Position`].

use std::str::FromStr;

use crate::auxiliary::{Aux, CastleRights};
use crate::chess_move::MoveKey;
use crate::color::Color;
use crate::error::FenError;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    /// Parse a six-field FEN string.
    ///
    /// Kings are not required, so sparse test boards parse. An en-passant
    /// target is turned into the opponent's double push stored in the
    /// auxiliary word, which is where move generation looks for it.
    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut placements = Vec::with_capacity(32);
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += skip as u8;
                    continue;
                }
                let kind = PieceKind::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength { rank_index, length: file as usize + 1 });
                }
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                placements.push((color, kind, Square::from_coords(file, rank)));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength { rank_index, length: file as usize });
            }
        }

        let to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_string() }),
        };

        let castling = CastleRights::from_fen(fields[2])
            .ok_or_else(|| FenError::InvalidCastling { found: fields[2].to_string() })?;

        for (field, name) in [(fields[4], "halfmove clock"), (fields[5], "fullmove number")] {
            field
                .parse::<u16>()
                .map_err(|_| FenError::InvalidMoveCounter { field: name, found: field.to_string() })?;
        }

        let mut aux = Aux::EMPTY.with_castling(castling);
        if fields[3] != "-" {
            let invalid = || FenError::InvalidEnPassant { found: fields[3].to_string() };
            let target = Square::from_algebraic(fields[3]).ok_or_else(invalid)?;
            let target_rank = match to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if target.rank() != target_rank {
                return Err(invalid());
            }
            let forward = to_move.forward();
            let from = target.offset(0, forward).ok_or_else(invalid)?;
            let to = target.offset(0, -forward).ok_or_else(invalid)?;
            if !placements.contains(&(to_move.flip(), PieceKind::Pawn, to)) {
                return Err(invalid());
            }
            aux = aux.with_last_move(MoveKey::new(from, to));
        }

        Ok(Position::from_placements(to_move, placements, aux)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Side;

    #[test]
    fn starting_fen_matches_builder() {
        let parsed: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Position::starting_position());
    }

    #[test]
    fn black_to_move_owns_black_pieces() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K2R b K - 0 1".parse().unwrap();
        assert_eq!(pos.to_move(), Color::Black);
        assert_eq!(pos.king_square(Side::Own), Some(Square::E8));
        assert_eq!(pos.kind_on(Side::Opp, Square::H1), Some(PieceKind::Rook));
        assert_eq!(pos.castling(), CastleRights::WHITE_KING);
    }

    #[test]
    fn en_passant_becomes_last_move() {
        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(pos.last_move(), Some(MoveKey::new(Square::D7, Square::D5)));
        assert_eq!(pos.en_passant_square(), Some(Square::D6));
    }

    #[test]
    fn en_passant_without_pawn_rejected() {
        let err = "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1".parse::<Position>().unwrap_err();
        assert_eq!(err, FenError::InvalidEnPassant { found: "d6".to_string() });
    }

    #[test]
    fn en_passant_on_wrong_rank_rejected() {
        // A black pawn on d2 would otherwise read as a backward d4-d2 push.
        let err = "4k3/8/8/8/8/8/3p4/4K3 w - d3 0 1".parse::<Position>().unwrap_err();
        assert_eq!(err, FenError::InvalidEnPassant { found: "d3".to_string() });

        let err = "4k3/3P4/8/8/8/8/8/4K3 b - d6 0 1".parse::<Position>().unwrap_err();
        assert_eq!(err, FenError::InvalidEnPassant { found: "d6".to_string() });

        let pos: Position = "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1".parse().unwrap();
        assert_eq!(pos.last_move(), Some(MoveKey::new(Square::D2, Square::D4)));
    }

    #[test]
    fn malformed_fields_fail_fast() {
        assert_eq!(
            "8/8/8/8 w - - 0 1".parse::<Position>().unwrap_err(),
            FenError::WrongRankCount { found: 4 }
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - -".parse::<Position>().unwrap_err(),
            FenError::WrongFieldCount { found: 4 }
        );
        assert!(matches!(
            "8/8/8/8/8/8/8/8 x - - 0 1".parse::<Position>(),
            Err(FenError::InvalidColor { .. })
        ));
        assert!(matches!(
            "8/8/8/8/8/8/8/7 w - - 0 1".parse::<Position>(),
            Err(FenError::BadRankLength { rank_index: 7, length: 7 })
        ));
        assert!(matches!(
            "8/8/8/8/8/8/8/8 w KX - 0 1".parse::<Position>(),
            Err(FenError::InvalidCastling { .. })
        ));
        assert!(matches!(
            "8/8/8/8/8/8/8/8 w - - x 1".parse::<Position>(),
            Err(FenError::InvalidMoveCounter { field: "halfmove clock", .. })
        ));
    }

    #[test]
    fn unknown_piece_letter_rejected() {
        assert_eq!(
            "8/8/8/8/8/8/8/7z w - - 0 1".parse::<Position>().unwrap_err(),
            FenError::InvalidPieceChar { character: 'z' }
        );
    }
}
