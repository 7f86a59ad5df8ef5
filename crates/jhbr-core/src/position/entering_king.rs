//! Entering-king declaration (CSA 27-point rule).
//!
//! The side to move may declare a win when all of the following hold:
//! - its king stands in the enemy camp (the three far ranks)
//! - at least 10 other own pieces stand in the enemy camp
//! - camp pieces plus pieces in hand score at least 28 points for Black,
//!   27 for White; bishops, rooks and their promotions count 5, others 1
//! - its king is not in check

use super::Position;
use crate::types::{Color, PieceType, Square};

const CAMP_PIECES_REQUIRED: u32 = 10;

#[inline]
fn points_required(color: Color) -> u32 {
    match color {
        Color::Black => 28,
        Color::White => 27,
    }
}

#[inline]
fn points(pt: PieceType) -> u32 {
    if pt.is_major() { 5 } else { 1 }
}

impl Position {
    pub fn is_entering_king_win(&self) -> bool {
        let us = self.side_to_move;
        let Some(king) = self.kings[us.index()] else {
            return false;
        };
        if !king.in_promotion_zone(us) || self.in_check() {
            return false;
        }

        let mut in_camp = 0;
        let mut score = 0;
        for sq in Square::all() {
            let pc = self.board[sq.index()];
            if pc.is_none() || pc.color() != us || sq == king || !sq.in_promotion_zone(us) {
                continue;
            }
            in_camp += 1;
            score += points(pc.piece_type());
        }
        if in_camp < CAMP_PIECES_REQUIRED {
            return false;
        }

        let hand = self.hands[us.index()];
        score += PieceType::HAND_PIECES
            .iter()
            .map(|&pt| hand.count(pt) * points(pt))
            .sum::<u32>();

        score >= points_required(us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKINS_IN_CAMP: &str = "+P+P+P+P1+P+P+P+P/7+P+P/4K4/9/9/9/9/9/4k4";

    #[test]
    fn declares_with_enough_points() {
        let pos = Position::from_sfen(&format!("{TOKINS_IN_CAMP} b 2R2B 1")).unwrap();
        assert!(pos.is_entering_king_win());
    }

    #[test]
    fn white_needs_one_point_less() {
        let pos = Position::from_sfen(&format!("{TOKINS_IN_CAMP} b R2B2P 1")).unwrap();
        assert!(!pos.is_entering_king_win());
        assert!(pos.flipped().is_entering_king_win());
    }

    #[test]
    fn needs_ten_pieces_in_camp() {
        let pos =
            Position::from_sfen("+P+P+P+P1+P+P+P+P/8+P/4K4/9/9/9/9/9/4k4 b 2R2B2G 1").unwrap();
        assert!(!pos.is_entering_king_win());
    }

    #[test]
    fn king_must_be_in_camp_and_safe() {
        let outside = Position::from_sfen("+P+P+P+P1+P+P+P+P/7+P+P/9/4K4/9/9/9/9/4k4 b 2R2B 1")
            .unwrap();
        assert!(!outside.is_entering_king_win());

        let checked =
            Position::from_sfen("+P+P+P+P1+P+P+P+P/7+P+P/4K4/9/9/9/9/9/4r3k b 2R2B 1").unwrap();
        assert!(checked.in_check());
        assert!(!checked.is_entering_king_win());
    }

    #[test]
    fn startpos_is_not_a_declaration() {
        assert!(!Position::startpos().is_entering_king_win());
    }
}
