//! Legal move generation.
//!
//! Pseudo-legal moves are produced square by square and then filtered on a
//! copy of the board: a move is kept when the mover's king is not attacked
//! afterwards and, for pawn drops giving check, when the opponent still has
//! a reply (no mate by pawn drop).

use super::pos::{apply_to_board, attacked, orient, rays, steps};
use super::Position;
use crate::types::{Color, Move, MoveList, Piece, PieceType, Square};

/// Pawns and lances cannot stand on the last rank, knights on the last two.
#[inline]
fn dead_end(pt: PieceType, to: Square, us: Color) -> bool {
    match pt {
        PieceType::Pawn | PieceType::Lance => to.relative_rank(us) == 0,
        PieceType::Knight => to.relative_rank(us) <= 1,
        _ => false,
    }
}

/// Emit the promoting and/or plain version of a board move.
/// Returns `true` when the sink asked to stop.
fn emit_board_move(
    from: Square,
    to: Square,
    pt: PieceType,
    us: Color,
    sink: &mut impl FnMut(Move) -> bool,
) -> bool {
    if pt.can_promote()
        && (from.in_promotion_zone(us) || to.in_promotion_zone(us))
        && sink(Move::new_move(from, to, true))
    {
        return true;
    }
    !dead_end(pt, to, us) && sink(Move::new_move(from, to, false))
}

impl Position {
    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pseudo_legal(&mut |m| {
            if self.is_legal_pseudo(m) {
                moves.push(m);
            }
            false
        });
        moves
    }

    /// Cheaper than `!legal_moves().is_empty()`: stops at the first legal move.
    pub fn has_legal_move(&self) -> bool {
        let mut found = false;
        self.generate_pseudo_legal(&mut |m| {
            found = self.is_legal_pseudo(m);
            found
        });
        found
    }

    /// Feed every pseudo-legal move to `sink` until it returns `true`.
    fn generate_pseudo_legal(&self, sink: &mut impl FnMut(Move) -> bool) {
        let us = self.side_to_move;

        for from in Square::all() {
            let pc = self.board[from.index()];
            if pc.is_none() || pc.color() != us {
                continue;
            }
            let pt = pc.piece_type();

            for delta in steps(pt) {
                let (df, dr) = orient(us, *delta);
                let Some(to) = from.offset(df, dr) else {
                    continue;
                };
                let target = self.board[to.index()];
                if (target.is_none() || target.color() != us)
                    && emit_board_move(from, to, pt, us, sink)
                {
                    return;
                }
            }

            for delta in rays(pt) {
                let (df, dr) = orient(us, *delta);
                let mut cur = from;
                while let Some(to) = cur.offset(df, dr) {
                    let target = self.board[to.index()];
                    if target.is_some() && target.color() == us {
                        break;
                    }
                    if emit_board_move(from, to, pt, us, sink) {
                        return;
                    }
                    if target.is_some() {
                        break;
                    }
                    cur = to;
                }
            }
        }

        let hand = self.hands[us.index()];
        if hand.is_empty() {
            return;
        }

        let mut pawn_files = [false; 9];
        let own_pawn = Piece::new(us, PieceType::Pawn);
        for sq in Square::all() {
            if self.board[sq.index()] == own_pawn {
                pawn_files[sq.file() as usize] = true;
            }
        }

        for pt in PieceType::HAND_PIECES {
            if !hand.has(pt) {
                continue;
            }
            for to in Square::all() {
                if self.board[to.index()].is_some() || dead_end(pt, to, us) {
                    continue;
                }
                if pt == PieceType::Pawn && pawn_files[to.file() as usize] {
                    continue;
                }
                if sink(Move::new_drop(pt, to)) {
                    return;
                }
            }
        }
    }

    fn is_legal_pseudo(&self, m: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();

        let king = if !m.is_drop() && self.board[m.from().index()].piece_type() == PieceType::King
        {
            Some(m.to())
        } else {
            self.kings[us.index()]
        };

        let mut board = self.board;
        apply_to_board(&mut board, m, us);
        if king.is_some_and(|k| attacked(&board, k, them)) {
            return false;
        }

        if m.is_drop()
            && m.drop_piece_type() == PieceType::Pawn
            && m.to().offset(0, us.forward()) == self.kings[them.index()]
            && self.kings[them.index()].is_some()
        {
            let mut after = self.detached();
            after.do_move(m);
            if !after.has_legal_move() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perft(pos: &mut Position, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = pos.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for m in moves {
            pos.do_move(m);
            nodes += perft(pos, depth - 1);
            pos.undo_move();
        }
        nodes
    }

    fn usi_moves(pos: &Position) -> Vec<String> {
        pos.legal_moves().iter().map(|m| m.to_usi()).collect()
    }

    #[test]
    fn perft_from_startpos() {
        let mut pos = Position::startpos();
        assert_eq!(perft(&mut pos, 1), 30);
        assert_eq!(perft(&mut pos, 2), 900);
        assert_eq!(perft(&mut pos, 3), 25_470);
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn no_second_pawn_on_a_file() {
        let pos = Position::from_sfen(
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b P 1",
        )
        .unwrap();
        assert!(pos.legal_moves().iter().all(|m| !m.is_drop()));
    }

    #[test]
    fn pawn_drop_mate_is_illegal() {
        let pos = Position::from_sfen("7nk/7p1/8G/9/9/9/9/9/4K4 b P 1").unwrap();
        assert!(!usi_moves(&pos).contains(&"P*1b".to_string()));

        // Gold moved away: the king can now escape, so the drop is allowed.
        let pos = Position::from_sfen("7nk/7p1/9/9/9/9/9/9/4K3G b P 1").unwrap();
        assert!(usi_moves(&pos).contains(&"P*1b".to_string()));
    }

    #[test]
    fn no_moves_when_mated() {
        let pos = Position::from_sfen("k7l/9/9/9/9/9/9/8g/8K b - 1").unwrap();
        assert!(pos.in_check());
        assert!(pos.legal_moves().is_empty());
        assert!(!pos.has_legal_move());
        assert!(pos.is_game_over());
    }

    #[test]
    fn single_escape() {
        let pos = Position::from_sfen("k6r1/9/9/9/9/9/9/9/8K b - 1").unwrap();
        assert_eq!(usi_moves(&pos), vec!["1i1h".to_string()]);
    }

    #[test]
    fn forced_promotion_on_last_rank() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/P8/4K4 b - 1").unwrap();
        let moves = usi_moves(&pos);
        assert!(moves.contains(&"9h9g".to_string()));

        let pos = Position::from_sfen("4k4/P8/9/9/9/9/9/9/4K4 b - 1").unwrap();
        let moves = usi_moves(&pos);
        assert!(moves.contains(&"9b9a+".to_string()));
        assert!(!moves.contains(&"9b9a".to_string()));
    }

    #[test]
    fn drops_respect_dead_end_ranks() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b NL 1").unwrap();
        let moves = usi_moves(&pos);
        assert!(!moves.iter().any(|m| m.starts_with("N*") && (m.ends_with('a') || m.ends_with('b'))));
        assert!(!moves.iter().any(|m| m.starts_with("L*") && m.ends_with('a')));
        assert!(moves.contains(&"N*5c".to_string()));
        assert!(moves.contains(&"L*1b".to_string()));
    }

    #[test]
    fn white_moves_mirror_black() {
        let pos = Position::from_sfen("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1")
            .unwrap();
        let moves = usi_moves(&pos);
        assert_eq!(moves.len(), 30);
        assert!(moves.contains(&"3c3d".to_string()));
        assert!(moves.contains(&"8b7b".to_string()));
    }
}
