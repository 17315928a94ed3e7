//! Tournament engine: submission gate, bracket generation and statistics.
//!
//! Everything here is a pure, synchronous computation over the evaluation
//! log; brackets and statistics are recomputed on every call and never
//! cached, so they are always consistent with the current log contents.

pub mod bracket;
pub mod gate;
pub mod stats;

#[cfg(test)]
mod bracket_test;

pub use bracket::{generate_brackets, BracketEntry, StageBracket};
pub use gate::submit;
pub use stats::{compute_statistics, registration_stats, RegistrationStats, TournamentStatistics};
