//! Amplitude-amplification move selector.
//!
//! Moves are laid out on an index space of `2^index_bits` states. Starting
//! from a uniform amplitude vector, each round flips the sign of the marked
//! states and reflects every amplitude about the mean. After
//! `floor(pi * sqrt(N / k) / 4)` rounds the squared amplitudes form the
//! outcome distribution, which is sampled `shots` times; the most frequent
//! index is mapped back to a move. The marked move usually wins, but not
//! always.

mod selector;

pub use selector::{AmplifiedSelector, SelectError, SelectorConfig};
