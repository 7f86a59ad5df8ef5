//! Depth-limited tree search.

mod limits;
mod negamax;

pub use limits::{HALT_UNBOUNDED, SearchLimits};
pub use negamax::{DEPTH_LIMIT, SearchResult, SearchStats, Searcher};
