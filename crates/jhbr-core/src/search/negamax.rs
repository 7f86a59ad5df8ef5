//! Fixed-depth minimax with randomised move order.
//!
//! Scores are always from Black's point of view. Black keeps the child with
//! the highest score and White the lowest; a child replaces the incumbent
//! only on strict improvement, so among equal scores the first one in the
//! shuffled order wins. A side with no legal move scores `-CHECKMATE` when
//! it is Black and `+CHECKMATE` when it is White, at every depth.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::eval::evaluate;
use crate::position::Position;
use crate::types::{Color, Move, Value};

/// Default horizon in plies.
pub const DEPTH_LIMIT: u32 = 3;

/// Best line found and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Moves from the root to the leaf that produced `score`.
    pub line: Vec<Move>,
    pub score: Value,
}

impl SearchResult {
    /// First move of the line, `None` when the root itself was terminal.
    pub fn best_move(&self) -> Option<Move> {
        self.line.first().copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls of `search`, terminal nodes included.
    pub nodes: u64,
    pub evaluations: u64,
}

pub struct Searcher<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    depth_limit: u32,
    stats: SearchStats,
}

impl<'a, R: Rng + ?Sized> Searcher<'a, R> {
    pub fn new(rng: &'a mut R, depth_limit: u32) -> Self {
        Searcher { rng, depth_limit, stats: SearchStats::default() }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `pos` from depth 0 with an empty path.
    pub fn search_root(&mut self, pos: &mut Position) -> SearchResult {
        let side = pos.side_to_move();
        let mut path = Vec::with_capacity(self.depth_limit as usize);
        self.search(pos, 0, &mut path, side)
    }

    /// Search the subtree below `path`.
    ///
    /// `path` holds the moves already played to reach `pos` and is restored
    /// before returning. `pos` is restored as well.
    pub fn search(
        &mut self,
        pos: &mut Position,
        depth: u32,
        path: &mut Vec<Move>,
        side: Color,
    ) -> SearchResult {
        debug_assert_eq!(side, pos.side_to_move());
        self.stats.nodes += 1;

        if depth >= self.depth_limit {
            if !pos.has_legal_move() {
                return mated(path, side);
            }
            self.stats.evaluations += 1;
            return SearchResult { line: path.clone(), score: evaluate(pos) };
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            return mated(path, side);
        }
        moves.shuffle(&mut *self.rng);

        let mut best_key = -(Value::CHECKMATE.raw() + 1);
        let mut best = SearchResult { line: Vec::new(), score: Value::ZERO };
        for m in moves {
            pos.do_move(m);
            path.push(m);
            let child = self.search(pos, depth + 1, path, side.opponent());
            path.pop();
            pos.undo_move();

            let key = match side {
                Color::Black => child.score.raw(),
                Color::White => -child.score.raw(),
            };
            if key > best_key {
                best_key = key;
                best = child;
            }
        }
        best
    }
}

fn mated(path: &[Move], side: Color) -> SearchResult {
    let score = match side {
        Color::Black => -Value::CHECKMATE,
        Color::White => Value::CHECKMATE,
    };
    SearchResult { line: path.to_vec(), score }
}
