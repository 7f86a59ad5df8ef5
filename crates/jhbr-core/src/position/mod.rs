//! Position representation.
//!
//! - `Position`: 81-square mailbox of packed piece codes, hands, side to move
//!   and an undo stack
//! - `do_move` / `undo_move`: reversible move application; an apply/undo pair
//!   restores an identical `Position`
//! - legal move generation with the full drop rules (nifu, uchifuzume)
//! - SFEN parsing and printing
//! - entering-king declaration check (CSA 27-point rule)

mod entering_king;
mod movegen;
mod pos;
mod sfen;

pub use pos::Position;
pub use sfen::{SFEN_HIRATE, SfenError};
