//! Static evaluation.

mod material;

pub use material::{
    BISHOP_VALUE, GOLD_VALUE, KNIGHT_VALUE, LANCE_VALUE, PAWN_VALUE, ROOK_VALUE, SILVER_VALUE,
    evaluate, hand_value,
};
