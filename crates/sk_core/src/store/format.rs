use std::collections::HashSet;

use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::StoreError;
use super::STORE_VERSION;
use crate::evaluation::Evaluation;
use crate::roster::Skater;
use crate::session::Session;

/// Persisted evaluation log: the whole collection is rewritten on every
/// write, so two concurrent writers race at file granularity and the last
/// writer wins. Acceptable under the single-administrator assumption.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvaluationFile {
    /// Format version for migration.
    pub version: u32,

    /// Write timestamp (unix milliseconds).
    pub saved_at: u64,

    pub evaluations: Vec<Evaluation>,
}

impl Default for EvaluationFile {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationFile {
    pub fn new() -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), evaluations: Vec::new() }
    }

    pub fn with_evaluations(evaluations: Vec<Evaluation>) -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), evaluations }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let mut pairs = HashSet::new();
        for evaluation in &self.evaluations {
            if !pairs.insert((evaluation.stage.as_str(), evaluation.participant_id.as_str())) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate evaluation for stage '{}' participant '{}'",
                    evaluation.stage, evaluation.participant_id
                )));
            }
        }
        Ok(())
    }
}

/// Persisted skater roster.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RosterFile {
    pub version: u32,
    pub saved_at: u64,
    pub skaters: Vec<Skater>,
}

impl Default for RosterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterFile {
    pub fn new() -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), skaters: Vec::new() }
    }

    pub fn with_skaters(skaters: Vec<Skater>) -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), skaters }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        for skater in &self.skaters {
            if !ids.insert(skater.id.as_str()) {
                return Err(StoreError::Corrupted(format!("duplicate skater id '{}'", skater.id)));
            }
        }
        Ok(())
    }
}

/// Persisted session flag.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionFile {
    pub version: u32,
    pub saved_at: u64,
    pub session: Session,
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFile {
    pub fn new() -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), session: Session::new() }
    }

    pub fn with_session(session: Session) -> Self {
        Self { version: STORE_VERSION, saved_at: current_timestamp(), session }
    }
}

/// Serialize a slot payload and compress it.
pub fn serialize_and_compress<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(value)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a slot payload.
pub fn decompress_and_deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    // Minimum size: LZ4 size header + checksum
    if bytes.len() < 4 + 32 {
        return Err(StoreError::Corrupted("payload too small".to_string()));
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;

    Ok(from_slice(&msgpack)?)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}
