//! Append-only diagnostic journal.
//!
//! One timestamped line per received `position` command and per amplified
//! selection. Writing is best effort: failures are logged and dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use jhbr_core::observer::{SearchObserver, SelectionReport, format_moves};
use parking_lot::Mutex;

pub struct Journal {
    path: PathBuf,
    file: Mutex<File>,
}

impl Journal {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Journal> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Journal { path, file: Mutex::new(file) })
    }

    fn append(&self, line: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let mut file = self.file.lock();
        if let Err(e) = writeln!(file, "{stamp} {line}").and_then(|()| file.flush()) {
            log::warn!("journal {}: {e}", self.path.display());
        }
    }
}

impl SearchObserver for Journal {
    fn position_set(&self, command: &str) {
        self.append(command);
    }

    fn selection(&self, report: &SelectionReport) {
        self.append(&format!(
            "allmoves = {} good = {} bestmove = {} time = {:.6}",
            report.candidates,
            format_moves(&report.marked),
            report.chosen,
            report.elapsed.as_secs_f64()
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jhbr_core::types::Move;

    use super::*;

    #[test]
    fn appends_events_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jhbr.log");

        let journal = Journal::open(&path).unwrap();
        journal.position_set("position startpos moves 7g7f");
        let m = Move::from_usi("3c3d").unwrap();
        journal.selection(&SelectionReport {
            candidates: 30,
            marked: vec![m],
            chosen: m,
            elapsed: Duration::from_millis(1500),
        });
        drop(journal);

        // Reopening appends instead of truncating.
        Journal::open(&path).unwrap().position_set("position startpos");

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" position startpos moves 7g7f"));
        assert!(lines[1].ends_with(" allmoves = 30 good = [3c3d] bestmove = 3c3d time = 1.500000"));
        assert!(lines[2].ends_with(" position startpos"));
    }
}
