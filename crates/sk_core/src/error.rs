use thiserror::Error;

use crate::store::StoreError;

/// Domain-level errors surfaced by the tournament service and submission gate.
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown stage: {0}")]
    StageNotFound(String),

    #[error("Unknown or inactive participant: {0}")]
    ParticipantNotFound(String),

    #[error("Administrator session required")]
    Unauthorized,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<serde_json::Error> for TournamentError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            TournamentError::Deserialization(err.to_string())
        } else {
            TournamentError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
