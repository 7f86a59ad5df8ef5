//! JHBR engine core: shogi rules, material evaluation, fixed-depth search and
//! the amplitude-amplification move selector.

pub mod amplify;
pub mod engine;
pub mod eval;
pub mod observer;
pub mod position;
pub mod search;
pub mod types;

pub use engine::{BestMove, EngineConfig, Thought, think};
pub use observer::{LogObserver, SearchObserver, SelectionReport};
pub use position::{Position, SfenError};
pub use types::{Color, Move, MoveError, Value};
