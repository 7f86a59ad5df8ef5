//! Search limits received with `go`.

/// `halt` value standing for "no node bound".
pub const HALT_UNBOUNDED: u64 = (1 << 31) - 1;

/// Budgets and flags of one `go` request.
///
/// Only `infinite`, `ponder` and `nodes` influence anything: together they
/// decide the `halt` threshold. Time fields are kept for the session and
/// diagnostics but the search does not enforce them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub btime: Option<u64>,
    pub wtime: Option<u64>,
    pub byoyomi: Option<u64>,
    pub binc: Option<u64>,
    pub winc: Option<u64>,
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub infinite: bool,
    pub ponder: bool,
}

impl SearchLimits {
    /// Abort threshold implied by these limits.
    pub fn halt(&self) -> Option<u64> {
        if self.infinite || self.ponder { Some(HALT_UNBOUNDED) } else { self.nodes }
    }

    /// Whether the search result waits for `stop`/`ponderhit` instead of being
    /// printed as soon as it is ready.
    pub fn is_deferred(&self) -> bool {
        self.infinite || self.ponder
    }
}
