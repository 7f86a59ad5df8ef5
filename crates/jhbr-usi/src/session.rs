//! Search session: current position, limits, the halt threshold and the
//! single search slot.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use jhbr_core::engine::{BestMove, EngineConfig};
use jhbr_core::observer::SearchObserver;
use jhbr_core::position::Position;
use jhbr_core::search::SearchLimits;
use log::{debug, error, info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::command::PositionCommand;
use crate::output::{UsiOutput, UsiResponse};
use crate::worker::{Finished, SearchJob, SearchTask};

pub struct Session {
    position: Position,
    limits: SearchLimits,
    halt: Option<u64>,
    config: EngineConfig,
    rng: Xoshiro256PlusPlus,
    observer: Arc<dyn SearchObserver>,
    output: UsiOutput,
    task: Option<SearchTask>,
}

impl Session {
    /// `seed` fixes every random choice of the session; `None` draws one
    /// from the thread RNG.
    pub fn new(
        config: EngineConfig,
        seed: Option<u64>,
        observer: Arc<dyn SearchObserver>,
        output: UsiOutput,
    ) -> Session {
        let rng = match seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        Session {
            position: Position::startpos(),
            limits: SearchLimits::default(),
            halt: None,
            config,
            rng,
            observer,
            output,
            task: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn halt(&self) -> Option<u64> {
        self.halt
    }

    /// A search is outstanding (running, or finished but not yet collected).
    pub fn is_searching(&self) -> bool {
        self.task.is_some()
    }

    pub fn new_game(&mut self) {
        self.position = Position::startpos();
    }

    pub fn ready(&mut self) {
        self.reap_reported();
        self.position = Position::startpos();
    }

    /// Load a base position and replay `moves` on it. On any error the
    /// current position is left as it was.
    pub fn set_position(&mut self, command: &PositionCommand) -> Result<()> {
        let mut pos = match &command.sfen {
            Some(sfen) => Position::from_sfen(sfen).with_context(|| format!("bad sfen: {sfen}"))?,
            None => Position::startpos(),
        };
        for (i, usi) in command.moves.iter().enumerate() {
            pos.push_usi(usi).with_context(|| format!("move {} of {}", i + 1, command))?;
        }
        self.position = pos;
        Ok(())
    }

    /// Pass a raw `position` line to the observer, whether or not it loads.
    pub fn record_position(&self, line: &str) {
        self.observer.position_set(line);
    }

    /// Store limits and derive the halt threshold from them.
    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.halt = limits.halt();
        self.limits = limits;
    }

    /// Start a background search of the current position under `limits`.
    ///
    /// Fails while another search is outstanding; a finished search that
    /// already printed its result does not count.
    pub fn go(&mut self, limits: SearchLimits) -> Result<()> {
        self.reap_reported();
        if self.task.is_some() {
            bail!("search already in progress");
        }
        self.set_limits(limits);

        let job = SearchJob {
            position: self.position.clone(),
            config: self.config,
            rng: Xoshiro256PlusPlus::seed_from_u64(self.rng.random()),
            observer: Arc::clone(&self.observer),
        };
        let deferred = self.limits.is_deferred();
        let task = SearchTask::spawn(job, self.output.clone(), deferred)
            .context("failed to spawn search thread")?;
        debug!("search started (halt {:?}, deferred {deferred})", self.halt);
        self.task = Some(task);
        Ok(())
    }

    /// Request the search to end and report its move.
    ///
    /// The search itself never looks at `halt`, so this waits for it to
    /// complete normally.
    pub fn stop(&mut self) {
        self.halt = Some(0);
        match self.task.take() {
            Some(task) => self.collect(task),
            None => debug!("stop without a pending search"),
        }
    }

    /// The pondered move was played: keep the result and report it.
    pub fn ponderhit(&mut self) {
        self.limits.ponder = false;
        match self.task.take() {
            Some(task) => self.collect(task),
            None => debug!("ponderhit without a pending search"),
        }
    }

    pub fn quit(&mut self) {
        self.halt = Some(0);
        if let Some(task) = self.task.take() {
            self.collect(task);
        }
        info!("session closed");
    }

    fn reap_reported(&mut self) {
        if self.task.as_ref().is_some_and(SearchTask::is_reported) {
            if let Some(task) = self.task.take() {
                self.collect(task);
            }
        }
    }

    fn collect(&self, task: SearchTask) {
        match task.finish() {
            Finished::Reported(thought) => debug!("bestmove {} already sent", thought.bestmove),
            Finished::Unreported(thought) => {
                self.output.send_or_log(&UsiResponse::from_thought(&thought));
            }
            Finished::Failed { reported: true } => error!("search failed after reporting"),
            Finished::Failed { reported: false } => {
                error!("search failed, resigning");
                self.output.send_or_log(&UsiResponse::BestMove {
                    best_move: BestMove::Resign,
                    ponder: None,
                });
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.task.is_some() {
            warn!("session dropped with a pending search");
            self.quit();
        }
    }
}

#[cfg(test)]
mod tests {
    use jhbr_core::observer::LogObserver;
    use jhbr_core::search::HALT_UNBOUNDED;

    use super::*;
    use crate::output::Capture;

    const MATED: &str = "k7l/9/9/9/9/9/9/8g/8K b - 1";

    fn session() -> (Session, Capture) {
        let capture = Capture::default();
        let config = EngineConfig { depth_limit: 1, ..Default::default() };
        let s = Session::new(config, Some(1), Arc::new(LogObserver), UsiOutput::new(capture.clone()));
        (s, capture)
    }

    fn position(sfen: Option<&str>, moves: &[&str]) -> PositionCommand {
        PositionCommand {
            sfen: sfen.map(str::to_string),
            moves: moves.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn bestmoves(capture: &Capture) -> Vec<String> {
        capture.lines().into_iter().filter(|l| l.starts_with("bestmove")).collect()
    }

    #[test]
    fn set_position_replays_moves() {
        let (mut s, _) = session();
        s.set_position(&position(None, &["7g7f", "3c3d"])).unwrap();
        let mut expected = Position::startpos();
        expected.push_usi("7g7f").unwrap();
        expected.push_usi("3c3d").unwrap();
        assert_eq!(s.position().to_sfen(), expected.to_sfen());
    }

    #[test]
    fn bad_position_keeps_previous() {
        let (mut s, _) = session();
        s.set_position(&position(None, &["7g7f"])).unwrap();
        let before = s.position().clone();
        assert!(s.set_position(&position(None, &["7g7f", "7g7f"])).is_err());
        assert!(s.set_position(&position(Some("9/9 b - 1"), &[])).is_err());
        assert_eq!(s.position(), &before);
    }

    #[test]
    fn new_game_and_ready_reset_position() {
        let (mut s, _) = session();
        s.set_position(&position(None, &["7g7f"])).unwrap();
        s.new_game();
        assert_eq!(s.position(), &Position::startpos());
        s.set_position(&position(None, &["7g7f"])).unwrap();
        s.ready();
        assert_eq!(s.position(), &Position::startpos());
    }

    #[test]
    fn limits_set_halt() {
        let (mut s, _) = session();
        s.set_limits(SearchLimits { nodes: Some(100), ..Default::default() });
        assert_eq!(s.halt(), Some(100));
        s.set_limits(SearchLimits { ponder: true, ..Default::default() });
        assert_eq!(s.halt(), Some(HALT_UNBOUNDED));
        s.set_limits(SearchLimits::default());
        assert_eq!(s.halt(), None);
    }

    #[test]
    fn go_then_stop_reports_exactly_once() {
        let (mut s, capture) = session();
        s.go(SearchLimits::default()).unwrap();
        s.stop();
        assert_eq!(s.halt(), Some(0));
        assert!(!s.is_searching());
        assert_eq!(bestmoves(&capture).len(), 1);
    }

    #[test]
    fn infinite_waits_for_stop() {
        let (mut s, capture) = session();
        s.set_position(&position(Some(MATED), &[])).unwrap();
        s.go(SearchLimits { infinite: true, ..Default::default() }).unwrap();
        assert!(s.is_searching());
        s.stop();
        assert_eq!(bestmoves(&capture), vec!["bestmove resign"]);
    }

    #[test]
    fn overlapping_go_is_rejected() {
        let (mut s, capture) = session();
        s.go(SearchLimits { infinite: true, ..Default::default() }).unwrap();
        assert!(s.go(SearchLimits::default()).is_err());
        s.stop();
        assert_eq!(bestmoves(&capture).len(), 1);
    }

    #[test]
    fn ponderhit_clears_ponder_and_reports() {
        let (mut s, capture) = session();
        s.go(SearchLimits { ponder: true, ..Default::default() }).unwrap();
        s.ponderhit();
        assert!(!s.limits().ponder);
        assert_eq!(s.halt(), Some(HALT_UNBOUNDED));
        assert_eq!(bestmoves(&capture).len(), 1);
    }

    #[test]
    fn stop_and_ponderhit_without_search_are_ignored() {
        let (mut s, capture) = session();
        s.stop();
        s.ponderhit();
        assert!(bestmoves(&capture).is_empty());
    }

    #[test]
    fn quit_reports_pending_search() {
        let (mut s, capture) = session();
        s.go(SearchLimits { infinite: true, ..Default::default() }).unwrap();
        s.quit();
        assert_eq!(bestmoves(&capture).len(), 1);
        assert!(!s.is_searching());
    }

    #[test]
    fn consecutive_auto_searches() {
        let (mut s, capture) = session();
        for _ in 0..3 {
            s.go(SearchLimits::default()).unwrap();
            s.stop();
        }
        s.go(SearchLimits::default()).unwrap();
        s.quit();
        assert_eq!(bestmoves(&capture).len(), 4);
    }
}
