//! SFEN parsing and printing.

use thiserror::Error;

use super::Position;
use crate::types::{Color, Piece, PieceType, Square};

/// Even-game initial position.
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("board must have 9 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} does not cover exactly 9 files")]
    FileCount { rank: usize },

    #[error("invalid board character: {0:?}")]
    InvalidPiece(char),

    #[error("piece cannot be promoted: {0:?}")]
    InvalidPromotion(char),

    #[error("invalid side to move: {0}")]
    InvalidSide(String),

    #[error("invalid hand: {0}")]
    InvalidHand(String),

    #[error("invalid move number: {0}")]
    InvalidMoveNumber(String),
}

impl Position {
    /// Parse `<board> <side> <hand> [<move number>]`.
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let mut fields = sfen.split_whitespace();
        let board = fields.next().ok_or(SfenError::MissingField("board"))?;
        let side = fields.next().ok_or(SfenError::MissingField("side to move"))?;
        let hand = fields.next().ok_or(SfenError::MissingField("hand"))?;

        let mut pos = Position::empty();
        parse_board(&mut pos, board)?;

        pos.side_to_move = match side {
            "b" => Color::Black,
            "w" => Color::White,
            other => return Err(SfenError::InvalidSide(other.to_string())),
        };

        parse_hand(&mut pos, hand)?;

        if let Some(ply) = fields.next() {
            pos.game_ply = ply
                .parse::<u32>()
                .map_err(|_| SfenError::InvalidMoveNumber(ply.to_string()))?;
        }
        Ok(pos)
    }

    pub fn to_sfen(&self) -> String {
        let mut out = String::with_capacity(96);
        for rank in 0..9u8 {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in (0..9u8).rev() {
                let pc = self.board[Square::new(file, rank).index()];
                if pc.is_none() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    out.push_str(&empty.to_string());
                    empty = 0;
                }
                out.push_str(&pc.to_sfen());
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }

        out.push(' ');
        out.push(self.side_to_move.to_sfen_char());
        out.push(' ');

        let hand_start = out.len();
        for color in Color::ALL {
            let hand = self.hands[color.index()];
            for pt in PieceType::HAND_PIECES {
                let n = hand.count(pt);
                if n == 0 {
                    continue;
                }
                if n > 1 {
                    out.push_str(&n.to_string());
                }
                out.push(match color {
                    Color::Black => pt.sfen_char(),
                    Color::White => pt.sfen_char().to_ascii_lowercase(),
                });
            }
        }
        if out.len() == hand_start {
            out.push('-');
        }

        out.push(' ');
        out.push_str(&self.game_ply.to_string());
        out
    }
}

fn parse_board(pos: &mut Position, board: &str) -> Result<(), SfenError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 9 {
        return Err(SfenError::RankCount(ranks.len()));
    }

    for (rank, text) in ranks.iter().enumerate() {
        let mut file: i32 = 8;
        let mut promoted = false;
        for c in text.chars() {
            if let Some(d) = c.to_digit(10) {
                if promoted || d == 0 {
                    return Err(SfenError::InvalidPiece(c));
                }
                file -= d as i32;
                continue;
            }
            if c == '+' {
                if promoted {
                    return Err(SfenError::InvalidPiece(c));
                }
                promoted = true;
                continue;
            }

            let base = PieceType::from_sfen_char(c).ok_or(SfenError::InvalidPiece(c))?;
            let pt = if promoted {
                base.promote().ok_or(SfenError::InvalidPromotion(c))?
            } else {
                base
            };
            promoted = false;
            if file < 0 {
                return Err(SfenError::FileCount { rank });
            }
            let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
            pos.put_piece(Square::new(file as u8, rank as u8), Piece::new(color, pt));
            file -= 1;
        }
        if file != -1 || promoted {
            return Err(SfenError::FileCount { rank });
        }
    }
    Ok(())
}

fn parse_hand(pos: &mut Position, hand: &str) -> Result<(), SfenError> {
    if hand == "-" {
        return Ok(());
    }
    let invalid = || SfenError::InvalidHand(hand.to_string());

    let mut count: u32 = 0;
    for c in hand.chars() {
        if let Some(d) = c.to_digit(10) {
            count = count * 10 + d;
            if count > 18 {
                return Err(invalid());
            }
            continue;
        }
        let pt = PieceType::from_sfen_char(c)
            .filter(|pt| *pt != PieceType::King)
            .ok_or_else(invalid)?;
        let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
        let n = if count == 0 { 1 } else { count };
        let held = &mut pos.hands[color.index()];
        held.set(pt, (held.count(pt) + n) as u8);
        count = 0;
    }
    if count != 0 {
        return Err(invalid());
    }
    Ok(())
}
