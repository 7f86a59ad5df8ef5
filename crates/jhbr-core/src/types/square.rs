//! Board squares.

use super::Color;

/// Square index 0..81, laid out file-major: `file * 9 + rank`.
///
/// File 0 is USI file `1` (Black's right edge), rank 0 is USI rank `a`
/// (White's back rank). `1a` = 0, `1i` = 8, `2a` = 9, ..., `9i` = 80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const NUM: usize = 81;

    pub const SQ_11: Square = Square(0);
    pub const SQ_55: Square = Square(40);
    pub const SQ_99: Square = Square(80);

    /// `file` and `rank` are zero-based and must be below 9.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 9 && rank < 9);
        Square(file * 9 + rank)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM { Some(Square(index as u8)) } else { None }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 / 9
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % 9
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Rank counted from `color`'s far edge: 0 is the last rank that side can reach.
    #[inline]
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::Black => self.rank(),
            Color::White => 8 - self.rank(),
        }
    }

    /// The three ranks where `color` may promote.
    #[inline]
    pub const fn in_promotion_zone(self, color: Color) -> bool {
        self.relative_rank(color) <= 2
    }

    /// Step by `(df, dr)` files/ranks, `None` when leaving the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if file < 0 || file > 8 || rank < 0 || rank > 8 {
            None
        } else {
            Some(Square::new(file as u8, rank as u8))
        }
    }

    /// 180-degree rotation.
    #[inline]
    pub const fn inverse(self) -> Square {
        Square(80 - self.0)
    }

    pub fn to_usi(self) -> String {
        let file = char::from(b'1' + self.file());
        let rank = char::from(b'a' + self.rank());
        format!("{file}{rank}")
    }

    pub fn from_usi(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'1').filter(|f| *f < 9)?;
        let rank = bytes[1].checked_sub(b'a').filter(|r| *r < 9)?;
        Some(Square::new(file, rank))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }
}
