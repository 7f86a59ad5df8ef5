//! Basic board types.
//!
//! ```text
//! Color
//!   ↓
//! Square
//!   ↓
//! PieceType
//!   ↓
//! Piece ← Move
//!   ↓
//! Hand
//!
//! Value is independent
//! ```

mod color;
mod hand;
mod moves;
mod piece;
mod piece_type;
mod square;
mod value;

pub use color::Color;
pub use hand::Hand;
pub use moves::{Move, MoveError, MoveList};
pub use piece::Piece;
pub use piece_type::PieceType;
pub use square::Square;
pub use value::Value;
