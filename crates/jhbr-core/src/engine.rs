//! The move-choice pipeline: terminal checks, tree search, then amplified
//! selection over all legal moves with the principal move marked.

use std::fmt;
use std::time::Instant;

use log::{debug, warn};
use rand::Rng;

use crate::amplify::{AmplifiedSelector, SelectorConfig};
use crate::observer::{SearchObserver, SelectionReport, format_moves};
use crate::position::Position;
use crate::search::{DEPTH_LIMIT, SearchResult, SearchStats, Searcher};
use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search horizon in plies, at least 1.
    pub depth_limit: u32,
    pub selector: SelectorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { depth_limit: DEPTH_LIMIT, selector: SelectorConfig::default() }
    }
}

/// Answer to a `go` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestMove {
    Move(Move),
    Resign,
    Win,
}

impl fmt::Display for BestMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestMove::Move(m) => write!(f, "{m}"),
            BestMove::Resign => f.write_str("resign"),
            BestMove::Win => f.write_str("win"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thought {
    pub bestmove: BestMove,
    /// Expected reply. This engine never proposes one.
    pub ponder: Option<Move>,
    /// Tree-search result; `None` when the position was already decided.
    pub principal: Option<SearchResult>,
    pub stats: SearchStats,
}

impl Thought {
    fn decided(bestmove: BestMove) -> Thought {
        Thought { bestmove, ponder: None, principal: None, stats: SearchStats::default() }
    }
}

/// Choose a move for the side to move in `pos`.
///
/// `pos` is used as scratch space by the search and is restored before
/// returning.
pub fn think<R: Rng + ?Sized>(
    pos: &mut Position,
    config: &EngineConfig,
    rng: &mut R,
    observer: &dyn SearchObserver,
) -> Thought {
    if pos.is_game_over() {
        debug!("no legal moves, resigning");
        return Thought::decided(BestMove::Resign);
    }
    if pos.is_entering_king_win() {
        debug!("entering-king declaration holds");
        return Thought::decided(BestMove::Win);
    }

    let (principal, stats) = {
        let mut searcher = Searcher::new(&mut *rng, config.depth_limit);
        let result = searcher.search_root(pos);
        (result, searcher.stats())
    };
    debug!(
        "score {} nodes {} evals {} pv {}",
        principal.score,
        stats.nodes,
        stats.evaluations,
        format_moves(&principal.line)
    );

    let Some(marked) = principal.best_move() else {
        return Thought::decided(BestMove::Resign);
    };

    let moves = pos.legal_moves();
    let selector = AmplifiedSelector::new(config.selector);
    let start = Instant::now();
    let chosen = match selector.select(&moves, &[marked], rng) {
        Ok(m) => m,
        Err(e) => {
            warn!("amplified selection failed ({e}), playing {marked}");
            marked
        }
    };
    observer.selection(&SelectionReport {
        candidates: moves.len(),
        marked: vec![marked],
        chosen,
        elapsed: start.elapsed(),
    });

    Thought { bestmove: BestMove::Move(chosen), ponder: None, principal: Some(principal), stats }
}
