//! Material count over packed piece codes.
//!
//! An on-board piece is worth its packed code with the owner bit removed,
//! so pawn..gold score 1..7, king 8, the small promoted pieces 9..12.
//! Codes whose type tag (`code & 0b111`) is `0b101` (bishop, horse) or
//! `0b110` (rook, dragon) get a correction that lifts bishop to 10 and
//! rook to 12. In hand, bishops and rooks are both worth
//! `BISHOP_VALUE + ROOK_VALUE`.

use crate::position::Position;
use crate::types::{Color, Hand, Piece, PieceType, Value};

pub const PAWN_VALUE: i32 = 1;
pub const LANCE_VALUE: i32 = 2;
pub const KNIGHT_VALUE: i32 = 3;
pub const SILVER_VALUE: i32 = 4;
pub const GOLD_VALUE: i32 = 7;
pub const BISHOP_VALUE: i32 = 10;
pub const ROOK_VALUE: i32 = 12;

const TYPE_TAG_MASK: u8 = 0b111;
const BISHOP_TAG: u8 = 0b101;
const ROOK_TAG: u8 = 0b110;

/// Weight of a held piece.
#[inline]
const fn hand_piece_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Lance => LANCE_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Silver => SILVER_VALUE,
        PieceType::Gold => GOLD_VALUE,
        PieceType::Bishop | PieceType::Rook => BISHOP_VALUE + ROOK_VALUE,
        _ => 0,
    }
}

#[inline]
fn tag_correction(code: u8) -> i32 {
    match code & TYPE_TAG_MASK {
        BISHOP_TAG => BISHOP_VALUE - PieceType::Bishop as i32,
        ROOK_TAG => ROOK_VALUE - PieceType::Rook as i32,
        _ => 0,
    }
}

/// Offset every piece of `color` carries in its packed code.
#[inline]
const fn owner_offset(color: Color) -> i32 {
    match color {
        Color::Black => 0,
        Color::White => Piece::OWNER_BIT as i32,
    }
}

/// Total value of the pieces held in `hand`.
pub fn hand_value(hand: Hand) -> i32 {
    PieceType::HAND_PIECES
        .iter()
        .map(|&pt| hand.count(pt) as i32 * hand_piece_value(pt))
        .sum()
}

/// Material balance from Black's point of view.
pub fn evaluate(pos: &Position) -> Value {
    let mut code_sum = [0i32; Color::NUM];
    let mut count = [0i32; Color::NUM];
    let mut correction = [0i32; Color::NUM];

    for pc in pos.pieces().iter().filter(|pc| pc.is_some()) {
        let side = pc.color().index();
        code_sum[side] += pc.raw() as i32;
        count[side] += 1;
        correction[side] += tag_correction(pc.raw());
    }

    let total = |color: Color| {
        let i = color.index();
        code_sum[i] - owner_offset(color) * count[i] + correction[i] + hand_value(pos.hand(color))
    };
    Value::new(total(Color::Black) - total(Color::White))
}
