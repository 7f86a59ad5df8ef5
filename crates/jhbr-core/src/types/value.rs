//! Scores.

use std::fmt;
use std::ops::Neg;

/// Signed score, always from the first player's (Black's) point of view.
///
/// `±CHECKMATE` marks a forced result for the side that has no legal move;
/// material scores stay far inside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    pub const ZERO: Value = Value(0);
    pub const CHECKMATE: Value = Value(30_000);

    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_checkmate(self) -> bool {
        self.0 == Self::CHECKMATE.0 || self.0 == -Self::CHECKMATE.0
    }
}

impl Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
