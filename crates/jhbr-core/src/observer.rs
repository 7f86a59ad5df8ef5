//! Hooks for diagnostics.
//!
//! The core never writes files or keeps global counters; callers pass an
//! observer that receives the events they care about.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::types::Move;

/// Outcome of one amplified selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionReport {
    /// Number of legal moves offered to the selector.
    pub candidates: usize,
    pub marked: Vec<Move>,
    pub chosen: Move,
    pub elapsed: Duration,
}

pub trait SearchObserver: Send + Sync {
    /// A `position` command arrived, before it is parsed. `command` is the
    /// full input line.
    fn position_set(&self, _command: &str) {}

    fn selection(&self, _report: &SelectionReport) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn position_set(&self, command: &str) {
        debug!("{command}");
    }

    fn selection(&self, report: &SelectionReport) {
        info!(
            "selected {} from {} moves (marked {}) in {:.3}s",
            report.chosen,
            report.candidates,
            format_moves(&report.marked),
            report.elapsed.as_secs_f64()
        );
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for Arc<T> {
    fn position_set(&self, command: &str) {
        (**self).position_set(command);
    }

    fn selection(&self, report: &SelectionReport) {
        (**self).selection(report);
    }
}

impl<T: SearchObserver> SearchObserver for Vec<T> {
    fn position_set(&self, command: &str) {
        for o in self {
            o.position_set(command);
        }
    }

    fn selection(&self, report: &SelectionReport) {
        for o in self {
            o.selection(report);
        }
    }
}

/// `[7g7f, 3c3d]`
pub fn format_moves(moves: &[Move]) -> String {
    let list: Vec<String> = moves.iter().map(|m| m.to_usi()).collect();
    format!("[{}]", list.join(", "))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl SearchObserver for Recorder {
        fn position_set(&self, command: &str) {
            self.0.lock().unwrap().push(command.to_string());
        }
    }

    #[test]
    fn fan_out_reaches_every_observer() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let mut all: Vec<Arc<dyn SearchObserver>> = Vec::new();
        all.push(a.clone());
        all.push(b.clone());
        all.push(Arc::new(LogObserver));
        all.position_set("position startpos");
        assert_eq!(a.0.lock().unwrap().as_slice(), ["position startpos"]);
        assert_eq!(b.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn move_list_format() {
        let m = Move::from_usi("7g7f").unwrap();
        assert_eq!(format_moves(&[m]), "[7g7f]");
        assert_eq!(format_moves(&[]), "[]");
    }
}
