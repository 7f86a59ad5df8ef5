use crate::types::{Color, Hand, Move, MoveError, Piece, PieceType, Square};

/// Step deltas `(file, rank)` in Black's frame; forward is `rank - 1`.
pub(super) const KING_STEPS: [(i8, i8); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];
const GOLD_STEPS: [(i8, i8); 6] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const SILVER_STEPS: [(i8, i8); 5] = [(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
pub(super) const KNIGHT_STEPS: [(i8, i8); 2] = [(-1, -2), (1, -2)];
const PAWN_STEPS: [(i8, i8); 1] = [(0, -1)];
pub(super) const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
pub(super) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const LANCE_RAYS: [(i8, i8); 1] = [(0, -1)];

/// Single-step destinations of a kind.
pub(super) fn steps(pt: PieceType) -> &'static [(i8, i8)] {
    match pt {
        PieceType::Pawn => &PAWN_STEPS,
        PieceType::Knight => &KNIGHT_STEPS,
        PieceType::Silver => &SILVER_STEPS,
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => &GOLD_STEPS,
        PieceType::King => &KING_STEPS,
        PieceType::Horse => &ORTHOGONAL,
        PieceType::Dragon => &DIAGONAL,
        PieceType::Lance | PieceType::Bishop | PieceType::Rook => &[],
    }
}

/// Sliding directions of a kind.
pub(super) fn rays(pt: PieceType) -> &'static [(i8, i8)] {
    match pt {
        PieceType::Lance => &LANCE_RAYS,
        PieceType::Bishop | PieceType::Horse => &DIAGONAL,
        PieceType::Rook | PieceType::Dragon => &ORTHOGONAL,
        _ => &[],
    }
}

/// Turn a Black-frame delta into a board delta for `color`.
#[inline]
pub(super) fn orient(color: Color, (df, dr): (i8, i8)) -> (i8, i8) {
    match color {
        Color::Black => (df, dr),
        Color::White => (-df, -dr),
    }
}

/// Whether any piece of `by` attacks `sq` on `board`.
pub(super) fn attacked(board: &[Piece; Square::NUM], sq: Square, by: Color) -> bool {
    for delta in KING_STEPS.iter().chain(KNIGHT_STEPS.iter()) {
        let (df, dr) = orient(by, *delta);
        if let Some(from) = sq.offset(-df, -dr) {
            let pc = board[from.index()];
            if pc.is_some() && pc.color() == by && steps(pc.piece_type()).contains(delta) {
                return true;
            }
        }
    }

    for delta in ORTHOGONAL.iter().chain(DIAGONAL.iter()) {
        let (df, dr) = orient(by, *delta);
        let mut cur = sq;
        while let Some(next) = cur.offset(-df, -dr) {
            let pc = board[next.index()];
            if pc.is_some() {
                if pc.color() == by && rays(pc.piece_type()).contains(delta) {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }
    false
}

/// Place the effect of `m` (played by `us`) on a bare board copy.
pub(super) fn apply_to_board(board: &mut [Piece; Square::NUM], m: Move, us: Color) {
    let to = m.to();
    if m.is_drop() {
        board[to.index()] = Piece::new(us, m.drop_piece_type());
    } else {
        let from = m.from();
        let moved = board[from.index()];
        board[from.index()] = Piece::NONE;
        board[to.index()] = if m.is_promotion() {
            Piece::new(us, moved.piece_type().promote().unwrap_or(moved.piece_type()))
        } else {
            moved
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UndoInfo {
    mv: Move,
    captured: Piece,
}

/// A shogi position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(super) board: [Piece; Square::NUM],
    pub(super) hands: [Hand; Color::NUM],
    pub(super) side_to_move: Color,
    pub(super) game_ply: u32,
    pub(super) kings: [Option<Square>; Color::NUM],
    history: Vec<UndoInfo>,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// Board with no pieces, Black to move.
    pub fn empty() -> Position {
        Position {
            board: [Piece::NONE; Square::NUM],
            hands: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
            game_ply: 1,
            kings: [None; Color::NUM],
            history: Vec::new(),
        }
    }

    /// Even-game initial layout.
    pub fn startpos() -> Position {
        match Position::from_sfen(super::SFEN_HIRATE) {
            Ok(pos) => pos,
            Err(e) => unreachable!("built-in initial SFEN is valid: {e}"),
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// Packed codes of all 81 squares, `0` for empty.
    #[inline]
    pub fn pieces(&self) -> &[Piece; Square::NUM] {
        &self.board
    }

    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hands[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// SFEN move number of the current position.
    #[inline]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// Number of moves that can be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        attacked(&self.board, sq, by)
    }

    /// Whether the side to move has its king attacked.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.kings[us.index()].is_some_and(|k| attacked(&self.board, k, us.opponent()))
    }

    /// Put `piece` on `sq`, replacing whatever stood there. Used while setting up positions.
    pub fn put_piece(&mut self, sq: Square, piece: Piece) {
        let old = self.board[sq.index()];
        if old.is_some() && old.piece_type() == PieceType::King {
            self.kings[old.color().index()] = None;
        }
        self.board[sq.index()] = piece;
        if piece.is_some() && piece.piece_type() == PieceType::King {
            self.kings[piece.color().index()] = Some(sq);
        }
    }

    /// Apply `m` for the side to move. `m` must be at least pseudo-legal.
    pub fn do_move(&mut self, m: Move) {
        let us = self.side_to_move;
        let to = m.to();
        let mut captured = Piece::NONE;

        if m.is_drop() {
            let pt = m.drop_piece_type();
            self.hands[us.index()].remove(pt);
            self.board[to.index()] = Piece::new(us, pt);
        } else {
            let from = m.from();
            let moved = self.board[from.index()];
            captured = self.board[to.index()];
            if captured.is_some() {
                let taken = captured.piece_type().unpromote();
                if taken == PieceType::King {
                    self.kings[captured.color().index()] = None;
                } else {
                    self.hands[us.index()].add(taken);
                }
            }
            self.board[from.index()] = Piece::NONE;
            self.board[to.index()] = match moved.promote() {
                Some(promoted) if m.is_promotion() => promoted,
                _ => moved,
            };
            if moved.piece_type() == PieceType::King {
                self.kings[us.index()] = Some(to);
            }
        }

        self.history.push(UndoInfo { mv: m, captured });
        self.side_to_move = us.opponent();
        self.game_ply += 1;
    }

    /// Take back the last move. Does nothing when there is no history.
    pub fn undo_move(&mut self) {
        let Some(UndoInfo { mv, captured }) = self.history.pop() else {
            return;
        };
        let us = self.side_to_move.opponent();
        let to = mv.to();

        if mv.is_drop() {
            self.board[to.index()] = Piece::NONE;
            self.hands[us.index()].add(mv.drop_piece_type());
        } else {
            let from = mv.from();
            let placed = self.board[to.index()];
            let moved = if mv.is_promotion() { placed.unpromote() } else { placed };
            self.board[from.index()] = moved;
            self.board[to.index()] = captured;
            if captured.is_some() {
                let taken = captured.piece_type().unpromote();
                if taken == PieceType::King {
                    self.kings[captured.color().index()] = Some(to);
                } else {
                    self.hands[us.index()].remove(taken);
                }
            }
            if moved.piece_type() == PieceType::King {
                self.kings[us.index()] = Some(from);
            }
        }

        self.side_to_move = us;
        self.game_ply -= 1;
    }

    /// Parse a USI move, check it is legal here and play it.
    pub fn push_usi(&mut self, usi: &str) -> Result<Move, MoveError> {
        let m = Move::from_usi(usi)?;
        if !self.legal_moves().contains(&m) {
            return Err(MoveError::Illegal(usi.to_string()));
        }
        self.do_move(m);
        Ok(m)
    }

    /// No legal move for the side to move (checkmate, or the rare no-move stalemate).
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move()
    }

    /// The same position with the two sides exchanged: board rotated 180
    /// degrees, owners, hands and side to move swapped. History is dropped.
    pub fn flipped(&self) -> Position {
        let mut board = [Piece::NONE; Square::NUM];
        for sq in Square::all() {
            board[sq.inverse().index()] = self.board[sq.index()].flip();
        }
        Position {
            board,
            hands: [self.hands[1], self.hands[0]],
            side_to_move: self.side_to_move.opponent(),
            game_ply: self.game_ply,
            kings: [self.kings[1].map(Square::inverse), self.kings[0].map(Square::inverse)],
            history: Vec::new(),
        }
    }

    /// Copy of the position without its undo history.
    pub(super) fn detached(&self) -> Position {
        Position {
            board: self.board,
            hands: self.hands,
            side_to_move: self.side_to_move,
            game_ply: self.game_ply,
            kings: self.kings,
            history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_usi(s).unwrap()
    }

    #[test]
    fn startpos_layout() {
        let pos = Position::startpos();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.piece_on(sq("5i")), Piece::B_KING);
        assert_eq!(pos.piece_on(sq("5a")), Piece::W_KING);
        assert_eq!(pos.piece_on(sq("7g")), Piece::B_PAWN);
        assert_eq!(pos.piece_on(sq("8h")), Piece::new(Color::Black, PieceType::Bishop));
        assert_eq!(pos.piece_on(sq("2h")), Piece::new(Color::Black, PieceType::Rook));
        assert_eq!(pos.king_square(Color::White), Some(sq("5a")));
        assert!(!pos.in_check());
    }

    #[test]
    fn do_undo_restores_identical_position() {
        let mut pos = Position::startpos();
        let original = pos.clone();
        for usi in ["7g7f", "3c3d", "8h2b+", "3a2b", "B*4e"] {
            pos.push_usi(usi).unwrap();
        }
        assert_eq!(pos.hand(Color::Black).count(PieceType::Bishop), 0);
        assert_eq!(pos.hand(Color::White).count(PieceType::Bishop), 1);
        for _ in 0..5 {
            pos.undo_move();
        }
        assert_eq!(pos, original);
    }

    #[test]
    fn capture_moves_piece_to_hand_unpromoted() {
        let mut pos = Position::startpos();
        pos.push_usi("7g7f").unwrap();
        pos.push_usi("3c3d").unwrap();
        pos.push_usi("8h2b+").unwrap();
        assert_eq!(pos.hand(Color::Black).count(PieceType::Bishop), 1);
        assert_eq!(pos.piece_on(sq("2b")), Piece::new(Color::Black, PieceType::Horse));
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut pos = Position::startpos();
        pos.undo_move();
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn push_usi_rejects_illegal_and_malformed() {
        let mut pos = Position::startpos();
        assert!(matches!(pos.push_usi("7g7e"), Err(MoveError::Illegal(_))));
        assert!(matches!(pos.push_usi("xx"), Err(MoveError::Malformed(_))));
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn flipped_twice_is_original() {
        let mut pos = Position::startpos();
        pos.push_usi("7g7f").unwrap();
        let flipped = pos.flipped();
        assert_eq!(flipped.side_to_move(), Color::Black);
        assert_eq!(flipped.piece_on(sq("3d")), Piece::W_PAWN);
        assert_eq!(flipped.piece_on(sq("7g")), Piece::B_PAWN);
        assert!(flipped.piece_on(sq("3c")).is_none());
        let back = flipped.flipped();
        assert_eq!(back.pieces(), pos.pieces());
        assert_eq!(back.side_to_move(), pos.side_to_move());
        assert_eq!(back.hand(Color::Black), pos.hand(Color::Black));
    }

    #[test]
    fn attack_detection_through_sliders() {
        let pos = Position::from_sfen("4k4/9/9/9/4R4/9/9/9/4K4 w - 1").unwrap();
        assert!(pos.in_check());
        assert!(pos.is_attacked(sq("5b"), Color::Black));
        assert!(!pos.is_attacked(sq("4b"), Color::Black));
        let blocked = Position::from_sfen("4k4/4p4/9/9/4R4/9/9/9/4K4 w - 1").unwrap();
        assert!(!blocked.in_check());
    }
}
