//! USI protocol output
//!
//! Every response is written as one line and flushed immediately. The writer
//! is shared between the command loop and the search worker, so lines from
//! the two never interleave.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use jhbr_core::engine::{BestMove, Thought};
use jhbr_core::types::Move;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsiResponse {
    IdName(String),
    UsiOk,
    ReadyOk,
    BestMove { best_move: BestMove, ponder: Option<Move> },
}

impl UsiResponse {
    pub fn from_thought(thought: &Thought) -> UsiResponse {
        UsiResponse::BestMove { best_move: thought.bestmove, ponder: thought.ponder }
    }
}

impl fmt::Display for UsiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsiResponse::IdName(name) => write!(f, "id name {name}"),
            UsiResponse::UsiOk => f.write_str("usiok"),
            UsiResponse::ReadyOk => f.write_str("readyok"),
            UsiResponse::BestMove { best_move, ponder: Some(p) } => {
                write!(f, "bestmove {best_move} ponder {p}")
            }
            UsiResponse::BestMove { best_move, ponder: None } => write!(f, "bestmove {best_move}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}

/// Line-oriented protocol writer, cheap to clone.
#[derive(Clone)]
pub struct UsiOutput {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl UsiOutput {
    pub fn new(writer: impl Write + Send + 'static) -> UsiOutput {
        UsiOutput { inner: Arc::new(Mutex::new(Box::new(writer))) }
    }

    pub fn stdout() -> UsiOutput {
        UsiOutput::new(io::stdout())
    }

    pub fn send(&self, response: &UsiResponse) -> Result<(), OutputError> {
        let mut w = self.inner.lock();
        writeln!(w, "{response}")?;
        w.flush()?;
        log::debug!("> {response}");
        Ok(())
    }

    /// Send, logging instead of returning a failure.
    pub fn send_or_log(&self, response: &UsiResponse) {
        if let Err(e) = self.send(response) {
            log::error!("{e}");
        }
    }
}

/// In-memory sink for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Capture {
    pub(crate) fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock()).lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
