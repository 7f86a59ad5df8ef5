//! USI front end: command parsing, the search session and its background
//! worker, protocol output and the diagnostic journal.

pub mod command;
pub mod engine;
pub mod journal;
pub mod output;
pub mod session;
pub mod worker;

pub use command::{PositionCommand, UsiCommand, parse_usi_command};
pub use engine::{ENGINE_NAME, UsiEngine};
pub use journal::Journal;
pub use output::{UsiOutput, UsiResponse};
pub use session::Session;
