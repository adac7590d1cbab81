//! Bitboard position seen from the side to move.
//!
//! A position stores twelve disjoint piece masks split into "own" (the side to
//! move) and "opponent". Playing a move produces a child with the two halves
//! swapped, so every node of the search reasons from the mover's perspective.

use std::fmt;

use crate::auxiliary::{Aux, CastleRights};
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveKey};
use crate::color::Color;
use crate::error::PositionError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// One half of a position, relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Opp,
}

impl Side {
    #[inline]
    pub const fn flip(self) -> Side {
        match self {
            Side::Own => Side::Opp,
            Side::Opp => Side::Own,
        }
    }
}

/// Canonical placement identity: the twelve masks in absolute colour order,
/// white pawn through white king, then black pawn through black king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey([Bitboard; 12]);

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    own: [Bitboard; PieceKind::COUNT],
    opp: [Bitboard; PieceKind::COUNT],
    to_move: Color,
    aux: Aux,
    score: i32,
    ordering_key: u32,
}

impl Position {
    /// A board with no pieces, `to_move` to play and no castling rights.
    pub const fn empty(to_move: Color) -> Position {
        Position {
            own: [Bitboard::EMPTY; PieceKind::COUNT],
            opp: [Bitboard::EMPTY; PieceKind::COUNT],
            to_move,
            aux: Aux::EMPTY,
            score: 0,
            ordering_key: 0,
        }
    }

    /// The standard initial array with White to move.
    pub fn starting_position() -> Position {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut pos = Position::empty(Color::White);
        for (file, kind) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            pos.put(Side::Own, kind, Square::from_coords(file, 0));
            pos.put(Side::Own, PieceKind::Pawn, Square::from_coords(file, 1));
            pos.put(Side::Opp, PieceKind::Pawn, Square::from_coords(file, 6));
            pos.put(Side::Opp, kind, Square::from_coords(file, 7));
        }
        pos.aux = pos.aux.with_castling(CastleRights::ALL);
        pos
    }

    /// Assemble a position from absolute-coloured placements.
    ///
    /// Rejects two pieces on one square. King counts are not checked here; see
    /// [`Position::validate`].
    pub fn from_placements<I>(to_move: Color, placements: I, aux: Aux) -> Result<Position, PositionError>
    where
        I: IntoIterator<Item = (Color, PieceKind, Square)>,
    {
        let mut pos = Position::empty(to_move);
        pos.aux = aux;
        for (color, kind, sq) in placements {
            if pos.occupied().contains(sq) {
                return Err(PositionError::OverlappingPieces { square: sq.to_string() });
            }
            let side = if color == to_move { Side::Own } else { Side::Opp };
            pos.put(side, kind, sq);
        }
        Ok(pos)
    }

    /// Check the invariants a playable position must hold: one king per side
    /// and no pawns on the first or last rank.
    pub fn validate(&self) -> Result<(), PositionError> {
        for side in [Side::Own, Side::Opp] {
            let count = self.pieces(side, PieceKind::King).count();
            if count != 1 {
                return Err(PositionError::InvalidKingCount { color: self.color_of(side), count });
            }
        }
        let pawns = self.pieces(Side::Own, PieceKind::Pawn) | self.pieces(Side::Opp, PieceKind::Pawn);
        if (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_nonempty() {
            return Err(PositionError::PawnsOnBackRank);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn put(&mut self, side: Side, kind: PieceKind, sq: Square) {
        let masks = self.masks_mut(side);
        masks[kind.index()] = masks[kind.index()].with(sq);
    }

    #[inline]
    fn masks(&self, side: Side) -> &[Bitboard; PieceKind::COUNT] {
        match side {
            Side::Own => &self.own,
            Side::Opp => &self.opp,
        }
    }

    #[inline]
    fn masks_mut(&mut self, side: Side) -> &mut [Bitboard; PieceKind::COUNT] {
        match side {
            Side::Own => &mut self.own,
            Side::Opp => &mut self.opp,
        }
    }

    #[inline]
    pub fn pieces(&self, side: Side, kind: PieceKind) -> Bitboard {
        self.masks(side)[kind.index()]
    }

    /// Union of every mask on one side.
    #[inline]
    pub fn side(&self, side: Side) -> Bitboard {
        self.masks(side).iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.side(Side::Own) | self.side(Side::Opp)
    }

    pub fn kind_on(&self, side: Side, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.pieces(side, kind).contains(sq))
    }

    pub fn piece_on(&self, sq: Square) -> Option<(Side, PieceKind)> {
        [Side::Own, Side::Opp]
            .into_iter()
            .find_map(|side| self.kind_on(side, sq).map(|kind| (side, kind)))
    }

    /// King square of one side, `None` on king-less test boards.
    #[inline]
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side, PieceKind::King).lsb()
    }

    /// Colour of the side labelled "own".
    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn color_of(&self, side: Side) -> Color {
        match side {
            Side::Own => self.to_move,
            Side::Opp => self.to_move.flip(),
        }
    }

    #[inline]
    pub fn aux(&self) -> Aux {
        self.aux
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.aux.castling()
    }

    /// The from/to of the move that led here.
    #[inline]
    pub fn last_move(&self) -> Option<MoveKey> {
        self.aux.last_move()
    }

    /// Square an own pawn may capture onto en passant, derived from the
    /// opponent's immediately preceding double push.
    pub fn en_passant_square(&self) -> Option<Square> {
        let last = self.aux.last_move()?;
        let pushed = self.pieces(Side::Opp, PieceKind::Pawn).contains(last.to);
        if !pushed || last.from.file() != last.to.file() || last.from.rank().abs_diff(last.to.rank()) != 2 {
            return None;
        }
        Square::from_index(((last.from.index() + last.to.index()) / 2) as u8)
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    #[inline]
    pub fn ordering_key(&self) -> u32 {
        self.ordering_key
    }

    #[inline]
    pub fn set_ordering_key(&mut self, key: u32) {
        self.ordering_key = key;
    }

    /// Number of pieces of both sides, kings included.
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.occupied().count()
    }

    pub fn key(&self) -> BoardKey {
        let (white, black) = match self.to_move {
            Color::White => (&self.own, &self.opp),
            Color::Black => (&self.opp, &self.own),
        };
        let mut masks = [Bitboard::EMPTY; 12];
        masks[..6].copy_from_slice(white);
        masks[6..].copy_from_slice(black);
        BoardKey(masks)
    }

    /// Apply an own move and return the child, relabelled for the opponent.
    ///
    /// Copy-make: `self` is untouched. Handles captures, the en-passant
    /// victim, queen promotion and castling-rights loss.
    pub fn play(&self, mv: Move) -> Position {
        let mut next = *self;
        let (from, to) = (mv.from(), mv.to());

        if let Some(victim) = self.kind_on(Side::Opp, to) {
            next.opp[victim.index()] = next.opp[victim.index()].without(to);
        } else if mv.piece() == PieceKind::Pawn && from.file() != to.file() {
            if let Some(passed) = to.offset(0, -self.to_move.forward()) {
                let pawns = PieceKind::Pawn.index();
                next.opp[pawns] = next.opp[pawns].without(passed);
            }
        }

        next.own[mv.piece().index()] = next.own[mv.piece().index()].without(from);
        next.own[mv.landing_piece().index()] = next.own[mv.landing_piece().index()].with(to);

        let rights = self
            .castling()
            .remove(CastleRights::revoked_by(from))
            .remove(CastleRights::revoked_by(to));

        Position {
            own: next.opp,
            opp: next.own,
            to_move: self.to_move.flip(),
            aux: self.aux.with_castling(rights).with_last_move(mv.key()),
            score: 0,
            ordering_key: 0,
        }
    }

    /// Colour-swapped, vertically mirrored copy. Own pieces stay own; a white
    /// pawn on e2 becomes a black pawn on e7.
    pub fn mirrored(&self) -> Position {
        let flip = |masks: &[Bitboard; PieceKind::COUNT]| masks.map(Bitboard::flip_vertical);
        let mut aux = Aux::EMPTY.with_castling(self.castling().flip_colors());
        if let Some(last) = self.last_move() {
            aux = aux.with_last_move(MoveKey::new(last.from.flip_vertical(), last.to.flip_vertical()));
        }
        Position {
            own: flip(&self.own),
            opp: flip(&self.opp),
            to_move: self.to_move.flip(),
            aux,
            score: self.score,
            ordering_key: self.ordering_key,
        }
    }

    /// Absolute colour and kind on `sq`.
    pub fn colored_piece_on(&self, sq: Square) -> Option<(Color, PieceKind)> {
        self.piece_on(sq).map(|(side, kind)| (self.color_of(side), kind))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = match self.colored_piece_on(Square::from_coords(file, rank)) {
                    Some((Color::White, kind)) => kind.fen_char().to_ascii_uppercase(),
                    Some((Color::Black, kind)) => kind.fen_char(),
                    None => '.',
                };
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({} to move)\n{self}", self.to_move)
    }
}
