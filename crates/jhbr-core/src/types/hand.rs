//! Pieces in hand.

use super::PieceType;

/// Captured pieces held by one side, one counter per droppable kind.
///
/// Indexed by `PieceType as usize - 1` for Pawn..=Gold (1..=7), which covers
/// every kind that can be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand([u8; 7]);

impl Hand {
    pub const EMPTY: Hand = Hand([0; 7]);

    #[inline]
    const fn slot(pt: PieceType) -> usize {
        debug_assert!(!pt.is_promoted() && !matches!(pt, PieceType::King));
        pt as usize - 1
    }

    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        self.0[Self::slot(pt)] as u32
    }

    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    #[inline]
    pub fn add(&mut self, pt: PieceType) {
        self.0[Self::slot(pt)] += 1;
    }

    #[inline]
    pub fn remove(&mut self, pt: PieceType) {
        debug_assert!(self.has(pt));
        self.0[Self::slot(pt)] -= 1;
    }

    pub fn set(&mut self, pt: PieceType, count: u8) {
        self.0[Self::slot(pt)] = count;
    }

    pub fn is_empty(self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Total number of pieces held.
    pub fn total(self) -> u32 {
        self.0.iter().map(|&c| c as u32).sum()
    }
}
