//! Moves and their USI notation.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use super::{PieceType, Square};

/// Move list sized for ordinary positions; the legal maximum is 593.
pub type MoveList = SmallVec<[Move; 128]>;

/// A move in 16 bits.
///
/// - bit 0-6:  destination square
/// - bit 7-13: origin square, or the dropped [`PieceType`] for drops
/// - bit 14:   drop flag
/// - bit 15:   promotion flag
///
/// Moves carry no piece information, so a move parsed from USI text
/// compares equal to the same move produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    const TO_MASK: u16 = 0x007F;
    const FROM_SHIFT: u16 = 7;
    const FROM_MASK: u16 = 0x3F80;
    const DROP_FLAG: u16 = 0x4000;
    const PROMOTE_FLAG: u16 = 0x8000;

    #[inline]
    pub const fn new_move(from: Square, to: Square, promote: bool) -> Move {
        let mut m = to.raw() as u16 | ((from.raw() as u16) << Self::FROM_SHIFT);
        if promote {
            m |= Self::PROMOTE_FLAG;
        }
        Move(m)
    }

    #[inline]
    pub const fn new_drop(piece_type: PieceType, to: Square) -> Move {
        Move(to.raw() as u16 | ((piece_type as u16) << Self::FROM_SHIFT) | Self::DROP_FLAG)
    }

    #[inline]
    pub fn to(self) -> Square {
        Square::from_index((self.0 & Self::TO_MASK) as usize).unwrap_or(Square::SQ_11)
    }

    /// Origin square of a board move. Meaningless for drops.
    #[inline]
    pub fn from(self) -> Square {
        debug_assert!(!self.is_drop());
        Square::from_index(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as usize)
            .unwrap_or(Square::SQ_11)
    }

    /// Kind placed by a drop. Meaningless for board moves.
    #[inline]
    pub fn drop_piece_type(self) -> PieceType {
        debug_assert!(self.is_drop());
        PieceType::from_u8(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8)
            .unwrap_or(PieceType::Pawn)
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        self.0 & Self::DROP_FLAG != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.0 & Self::PROMOTE_FLAG != 0
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// USI notation: `7g7f`, `8h2b+`, `P*5e`.
    pub fn to_usi(self) -> String {
        if self.is_drop() {
            format!("{}*{}", self.drop_piece_type().sfen_char(), self.to().to_usi())
        } else if self.is_promotion() {
            format!("{}{}+", self.from().to_usi(), self.to().to_usi())
        } else {
            format!("{}{}", self.from().to_usi(), self.to().to_usi())
        }
    }

    /// Parse USI notation. Only the syntax is checked, not legality.
    pub fn from_usi(s: &str) -> Result<Move, MoveError> {
        let malformed = || MoveError::Malformed(s.to_string());
        if let Some((piece, to)) = s.split_once('*') {
            let mut chars = piece.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(malformed());
            };
            if !c.is_ascii_uppercase() {
                return Err(malformed());
            }
            let pt = PieceType::from_sfen_char(c)
                .filter(|pt| *pt != PieceType::King)
                .ok_or_else(malformed)?;
            let to = Square::from_usi(to).ok_or_else(malformed)?;
            return Ok(Move::new_drop(pt, to));
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(malformed());
        }
        let from = Square::from_usi(&body[0..2]).ok_or_else(malformed)?;
        let to = Square::from_usi(&body[2..4]).ok_or_else(malformed)?;
        Ok(Move::new_move(from, to, promote))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_usi())
    }
}

/// Errors raised when text does not name a playable move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed USI move: {0}")]
    Malformed(String),

    #[error("illegal move in this position: {0}")]
    Illegal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_move_notation() {
        let m = Move::from_usi("7g7f").unwrap();
        assert_eq!(m.from(), Square::from_usi("7g").unwrap());
        assert_eq!(m.to(), Square::from_usi("7f").unwrap());
        assert!(!m.is_promotion());
        assert!(!m.is_drop());
        assert_eq!(m.to_string(), "7g7f");
    }

    #[test]
    fn promotion_and_drop_notation() {
        let m = Move::from_usi("8h2b+").unwrap();
        assert!(m.is_promotion());
        assert_eq!(m.to_usi(), "8h2b+");

        let d = Move::from_usi("P*5e").unwrap();
        assert!(d.is_drop());
        assert_eq!(d.drop_piece_type(), PieceType::Pawn);
        assert_eq!(d.to(), Square::SQ_55);
        assert_eq!(d.to_usi(), "P*5e");
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["", "7g", "7g7", "7g7f++", "0a1a", "K*5e", "p*5e", "PP*5e", "P*5", "resign"] {
            assert!(Move::from_usi(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn parsed_equals_constructed() {
        let built = Move::new_move(Square::new(6, 6), Square::new(6, 5), false);
        assert_eq!(Move::from_usi("7g7f").unwrap(), built);
        let drop = Move::new_drop(PieceType::Gold, Square::SQ_55);
        assert_eq!(Move::from_usi("G*5e").unwrap(), drop);
    }
}
