//! Owned piece, packed into five bits.
//!
//! - bits 0-3: [`PieceType`] (1..=14); `0` only for [`Piece::NONE`]
//! - bit 4: owner (`0` = Black, `1` = White)
//!
//! The evaluator works on these raw codes directly.

use super::{Color, PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    /// Owner bit of the packed code.
    pub const OWNER_BIT: u8 = 0b1_0000;

    pub const B_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const B_GOLD: Piece = Piece::new(Color::Black, PieceType::Gold);
    pub const B_KING: Piece = Piece::new(Color::Black, PieceType::King);
    pub const W_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const W_GOLD: Piece = Piece::new(Color::White, PieceType::Gold);
    pub const W_KING: Piece = Piece::new(Color::White, PieceType::King);

    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// Decode a raw code; `None` for anything that is not an empty square or a real piece.
    pub const fn from_raw(raw: u8) -> Option<Piece> {
        if raw == 0 {
            return Some(Piece::NONE);
        }
        if raw & !(Self::OWNER_BIT | 0x0F) != 0 {
            return None;
        }
        match PieceType::from_u8(raw & 0x0F) {
            Some(_) => Some(Piece(raw)),
            None => None,
        }
    }

    /// Kind of a non-empty piece.
    ///
    /// Calling this on [`Piece::NONE`] is a logic error; it answers `Pawn`.
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match PieceType::from_u8(self.0 & 0x0F) {
            Some(pt) => pt,
            None => PieceType::Pawn,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & Self::OWNER_BIT == 0 { Color::Black } else { Color::White }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Same kind, other owner.
    #[inline]
    pub const fn flip(self) -> Piece {
        if self.is_none() { self } else { Piece(self.0 ^ Self::OWNER_BIT) }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Promoted form with the same owner, `None` if the kind cannot promote.
    #[inline]
    pub const fn promote(self) -> Option<Piece> {
        match self.piece_type().promote() {
            Some(pt) => Some(Piece::new(self.color(), pt)),
            None => None,
        }
    }

    #[inline]
    pub const fn unpromote(self) -> Piece {
        if self.is_none() { self } else { Piece::new(self.color(), self.piece_type().unpromote()) }
    }

    /// SFEN token (`P`, `+r`, ...). Empty string for [`Piece::NONE`].
    pub fn to_sfen(self) -> String {
        if self.is_none() {
            return String::new();
        }
        let pt = self.piece_type();
        let letter = match self.color() {
            Color::Black => pt.sfen_char(),
            Color::White => pt.sfen_char().to_ascii_lowercase(),
        };
        if pt.is_promoted() { format!("+{letter}") } else { letter.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_codes_match_owner_bit_layout() {
        assert_eq!(Piece::B_PAWN.raw(), 1);
        assert_eq!(Piece::W_PAWN.raw(), 17);
        assert_eq!(Piece::new(Color::Black, PieceType::Dragon).raw(), 14);
        assert_eq!(Piece::new(Color::White, PieceType::Dragon).raw(), 30);
        assert_eq!(Piece::W_KING.color(), Color::White);
        assert_eq!(Piece::W_KING.piece_type(), PieceType::King);
    }

    #[test]
    fn flip_swaps_owner_only() {
        assert_eq!(Piece::B_GOLD.flip(), Piece::W_GOLD);
        assert_eq!(Piece::W_GOLD.flip(), Piece::B_GOLD);
        assert_eq!(Piece::NONE.flip(), Piece::NONE);
    }

    #[test]
    fn from_raw_rejects_garbage() {
        assert_eq!(Piece::from_raw(0), Some(Piece::NONE));
        assert_eq!(Piece::from_raw(17), Some(Piece::W_PAWN));
        assert_eq!(Piece::from_raw(15), None);
        assert_eq!(Piece::from_raw(16), None);
        assert_eq!(Piece::from_raw(40), None);
    }

    #[test]
    fn sfen_tokens() {
        assert_eq!(Piece::B_PAWN.to_sfen(), "P");
        assert_eq!(Piece::new(Color::White, PieceType::Dragon).to_sfen(), "+r");
        assert_eq!(Piece::NONE.to_sfen(), "");
    }
}
