//! Background search with exactly-once `bestmove`.
//!
//! A task reports in one of two ways:
//! - auto: the worker prints `bestmove` itself as soon as the search ends
//! - deferred (`go infinite` / `go ponder`): the result waits for `stop`,
//!   `ponderhit` or `quit`, and the command loop prints it
//!
//! Both sides race on a shared emission state. The worker moves it from
//! `AUTO` to `CLAIMED` before printing; the command loop swaps in `CLAIMED`
//! when it takes the result over. Whoever claims first prints, the other
//! stays silent.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};
use jhbr_core::engine::{EngineConfig, Thought, think};
use jhbr_core::observer::SearchObserver;
use jhbr_core::position::Position;
use log::{debug, error};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::output::{UsiOutput, UsiResponse};

const AUTO: u8 = 0;
const DEFERRED: u8 = 1;
const CLAIMED: u8 = 2;

/// What the command loop still has to do once a task is over.
#[derive(Debug)]
pub enum Finished {
    /// The worker already printed `bestmove`.
    Reported(Thought),
    /// Nobody printed yet; the caller must.
    Unreported(Thought),
    /// The worker died without a result. `reported` tells whether it had
    /// claimed the emission before failing.
    Failed { reported: bool },
}

/// Everything a search needs, moved onto the worker thread.
pub struct SearchJob {
    pub position: Position,
    pub config: EngineConfig,
    pub rng: Xoshiro256PlusPlus,
    pub observer: Arc<dyn SearchObserver>,
}

/// The single outstanding search.
pub struct SearchTask {
    emission: Arc<AtomicU8>,
    result: Receiver<Thought>,
    handle: Option<JoinHandle<()>>,
}

impl SearchTask {
    pub fn spawn(job: SearchJob, output: UsiOutput, deferred: bool) -> std::io::Result<SearchTask> {
        let emission = Arc::new(AtomicU8::new(if deferred { DEFERRED } else { AUTO }));
        let (tx, rx) = bounded(1);

        let state = Arc::clone(&emission);
        let handle = thread::Builder::new().name("jhbr-search".to_string()).spawn(move || {
            let SearchJob { mut position, config, mut rng, observer } = job;
            let thought = think(&mut position, &config, &mut rng, &*observer);
            debug!("search finished: {}", thought.bestmove);

            if state.compare_exchange(AUTO, CLAIMED, Ordering::AcqRel, Ordering::Acquire).is_ok() {
                output.send_or_log(&UsiResponse::from_thought(&thought));
            }
            if tx.send(thought).is_err() {
                debug!("search result dropped: receiver gone");
            }
        })?;

        Ok(SearchTask { emission, result: rx, handle: Some(handle) })
    }

    /// The worker has printed its own `bestmove`; finishing will not block
    /// for long.
    pub fn is_reported(&self) -> bool {
        self.emission.load(Ordering::Acquire) == CLAIMED
    }

    /// Take the task over and wait for its result.
    pub fn finish(mut self) -> Finished {
        let previous = self.emission.swap(CLAIMED, Ordering::AcqRel);
        let received = self.result.recv();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("search thread panicked");
            }
        }

        match received {
            Ok(thought) if previous == CLAIMED => Finished::Reported(thought),
            Ok(thought) => Finished::Unreported(thought),
            Err(_) => Finished::Failed { reported: previous == CLAIMED },
        }
    }
}
