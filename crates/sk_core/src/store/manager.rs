use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::format::{
    decompress_and_deserialize, serialize_and_compress, EvaluationFile, RosterFile, SessionFile,
};
use super::migration::{migrate_evaluations, migrate_roster};
use super::STORE_VERSION;
use crate::evaluation::EvaluationLog;
use crate::roster::Roster;
use crate::session::Session;

// Fixed slot keys, one file per key.
const EVALUATIONS_SLOT: &str = "skatepark_tournament_evaluations";
const SKATERS_SLOT: &str = "skatepark_skaters";
const SESSION_SLOT: &str = "skatepark_admin_session";

/// Durable key-value store over a data directory.
///
/// Every write rewrites the whole collection for its slot; there is no
/// per-record delta and no cross-process locking, so concurrent writers race
/// at slot granularity and the last writer wins. The system assumes a single
/// administrative actor per data directory.
///
/// A missing slot file is the "no data" case and loads as the empty default;
/// every other failure propagates as [`StoreError`].
pub struct StorageManager {
    data_dir: PathBuf,
}

impl StorageManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // ========================
    // Evaluation log slot
    // ========================

    pub fn load_evaluations(&self) -> Result<EvaluationLog, StoreError> {
        let path = self.slot_path(EVALUATIONS_SLOT);
        if !path.exists() {
            log::debug!("No evaluation log at {:?}, starting empty", path);
            return Ok(EvaluationLog::new());
        }

        let bytes = Self::read_slot(&path)?;
        let file: EvaluationFile = decompress_and_deserialize(&bytes)?;
        let file = migrate_evaluations(file)?;
        file.validate()?;

        log::debug!("Loaded {} evaluations from {:?}", file.evaluations.len(), path);
        Ok(EvaluationLog::from_records(file.evaluations))
    }

    pub fn save_evaluations(&self, log: &EvaluationLog) -> Result<(), StoreError> {
        let file = EvaluationFile::with_evaluations(log.records().to_vec());
        file.validate()?;

        let bytes = serialize_and_compress(&file)?;
        self.write_slot(&self.slot_path(EVALUATIONS_SLOT), &bytes)?;

        log::debug!("Saved {} evaluations", file.evaluations.len());
        Ok(())
    }

    /// Whole-store reset. Not part of the normal flow.
    pub fn reset_evaluations(&self) -> Result<(), StoreError> {
        let path = self.slot_path(EVALUATIONS_SLOT);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted evaluation log at {:?}", path);
        }
        Ok(())
    }

    // ========================
    // Roster slot
    // ========================

    pub fn load_roster(&self) -> Result<Roster, StoreError> {
        let path = self.slot_path(SKATERS_SLOT);
        if !path.exists() {
            log::debug!("No roster at {:?}, starting empty", path);
            return Ok(Roster::new());
        }

        let bytes = Self::read_slot(&path)?;
        let file: RosterFile = decompress_and_deserialize(&bytes)?;
        let file = migrate_roster(file)?;
        file.validate()?;

        log::debug!("Loaded {} skaters from {:?}", file.skaters.len(), path);
        Ok(Roster::from_skaters(file.skaters))
    }

    pub fn save_roster(&self, roster: &Roster) -> Result<(), StoreError> {
        let file = RosterFile::with_skaters(roster.skaters().to_vec());
        file.validate()?;

        let bytes = serialize_and_compress(&file)?;
        self.write_slot(&self.slot_path(SKATERS_SLOT), &bytes)?;

        log::debug!("Saved {} skaters", file.skaters.len());
        Ok(())
    }

    // ========================
    // Session slot
    // ========================

    pub fn load_session(&self) -> Result<Session, StoreError> {
        let path = self.slot_path(SESSION_SLOT);
        if !path.exists() {
            return Ok(Session::new());
        }

        let bytes = Self::read_slot(&path)?;
        let file: SessionFile = decompress_and_deserialize(&bytes)?;
        if file.version > STORE_VERSION {
            log::warn!(
                "Loading session from future version {} (current: {})",
                file.version,
                STORE_VERSION
            );
        }
        Ok(file.session)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        let file = SessionFile::with_session(session.clone());
        let bytes = serialize_and_compress(&file)?;
        self.write_slot(&self.slot_path(SESSION_SLOT), &bytes)
    }

    // Private helpers

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(format!("{slot}.dat"))
    }

    fn read_slot(path: &Path) -> Result<Vec<u8>, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    fn write_slot(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file, fsync, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}
