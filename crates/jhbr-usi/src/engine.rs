//! Command loop.

use std::io::BufRead;

use anyhow::Result;
use log::{debug, info, warn};

use crate::command::{UsiCommand, parse_usi_command};
use crate::output::{UsiOutput, UsiResponse};
use crate::session::Session;

pub const ENGINE_NAME: &str = "JHBR";

/// Reads commands one line at a time and drives a [`Session`].
pub struct UsiEngine {
    session: Session,
    output: UsiOutput,
}

impl UsiEngine {
    pub fn new(session: Session, output: UsiOutput) -> UsiEngine {
        UsiEngine { session, output }
    }

    /// Run until `quit` or end of input.
    /// Lines that are not valid UTF-8 are decoded lossily.
    pub fn run(&mut self, mut input: impl BufRead) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if !self.handle_line(line.trim_end_matches(['\r', '\n'])) {
                return Ok(());
            }
        }
        debug!("end of input");
        self.session.quit();
        Ok(())
    }

    /// Handle one input line. Returns `false` once the engine should exit.
    pub fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        debug!("< {line}");
        if line.split_whitespace().next() == Some("position") {
            self.session.record_position(line.trim());
        }
        let command = match parse_usi_command(line) {
            Ok(c) => c,
            Err(e) => {
                warn!("ignoring input: {e}");
                return true;
            }
        };

        match command {
            UsiCommand::Usi => {
                self.output.send_or_log(&UsiResponse::IdName(ENGINE_NAME.to_string()));
                self.output.send_or_log(&UsiResponse::UsiOk);
            }
            UsiCommand::IsReady => {
                self.session.ready();
                self.output.send_or_log(&UsiResponse::ReadyOk);
            }
            UsiCommand::SetOption { name, value } => {
                debug!("setoption {name} = {value:?} has no effect");
            }
            UsiCommand::UsiNewGame => self.session.new_game(),
            UsiCommand::Position(p) => {
                if let Err(e) = self.session.set_position(&p) {
                    warn!("position rejected: {e:#}");
                }
            }
            UsiCommand::Go(limits) => {
                if let Err(e) = self.session.go(limits) {
                    warn!("Ignoring go: {e:#}");
                }
            }
            UsiCommand::Stop => self.session.stop(),
            UsiCommand::PonderHit => self.session.ponderhit(),
            UsiCommand::Quit => {
                info!("quit");
                self.session.quit();
                return false;
            }
        }
        true
    }
}
