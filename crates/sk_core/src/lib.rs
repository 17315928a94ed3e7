//! # sk_core - Skatepark Tournament Core
//!
//! Core library for registering skateboarders and running a simple
//! elimination-style tournament with per-stage judge scoring.
//!
//! ## Features
//! - Append/update evaluation log with one record per (stage, participant)
//! - Deterministic bracket generation with ranked standings and stage winners
//! - Dashboard statistics derived from the same log, never cached
//! - Durable single-actor persistence with versioned, checksummed slots
//!
//! The presentation layer (routing, forms, rendering) lives outside this
//! crate and consumes the [`TournamentService`] surface or the JSON facade
//! in [`api`].

pub mod api;
pub mod catalog;
pub mod error;
pub mod evaluation;
pub mod roster;
pub mod service;
pub mod session;
pub mod store;
pub mod tournament;

// Re-export the main service surface
pub use error::{Result, TournamentError};
pub use service::{TournamentService, DEFAULT_JUDGE};

// Re-export domain types
pub use catalog::{find_stage, stages, Stage, TOURNAMENT_STAGES};
pub use evaluation::{Evaluation, EvaluationLog};
pub use roster::{Roster, SkateSpecialty, Skater};
pub use session::{Session, ADMIN_PASSWORD};

// Re-export the engine
pub use tournament::{
    compute_statistics, generate_brackets, registration_stats, BracketEntry, RegistrationStats,
    StageBracket, TournamentStatistics,
};

// Re-export the persistence layer
pub use store::{StorageManager, StoreError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
