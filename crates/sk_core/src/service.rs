//! Service facade owning the persisted state and the session.
//!
//! The presentation layer talks to exactly this surface: roster management,
//! login, evaluation submission, and the derived bracket/statistics views.
//! All state is loaded from the storage manager on open and written through
//! on every mutation; reads recompute from the in-memory snapshot.

use std::path::PathBuf;

use crate::error::{Result, TournamentError};
use crate::evaluation::{Evaluation, EvaluationLog};
use crate::roster::{Roster, Skater};
use crate::session::Session;
use crate::store::StorageManager;
use crate::tournament::{
    self, RegistrationStats, StageBracket, TournamentStatistics,
};

/// Judge identifier recorded on evaluations in absence of multi-admin
/// accounts.
pub const DEFAULT_JUDGE: &str = "admin";

pub struct TournamentService {
    storage: StorageManager,
    roster: Roster,
    evaluations: EvaluationLog,
    session: Session,
}

impl TournamentService {
    /// Open the service over a data directory, loading all persisted slots.
    /// Missing slots start empty; corrupted ones fail the open.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let storage = StorageManager::new(data_dir);
        let roster = storage.load_roster()?;
        let evaluations = storage.load_evaluations()?;
        let session = storage.load_session()?;

        log::info!(
            "Opened tournament service: {} skaters, {} evaluations",
            roster.len(),
            evaluations.len()
        );
        Ok(Self { storage, roster, evaluations, session })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ========================
    // Roster management
    // ========================

    pub fn register_skater(&mut self, skater: Skater) -> Result<()> {
        self.roster.add(skater)?;
        self.storage.save_roster(&self.roster)?;
        Ok(())
    }

    pub fn update_skater<F>(&mut self, id: &str, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Skater),
    {
        if !self.roster.update(id, mutate) {
            return Err(TournamentError::ParticipantNotFound(id.to_string()));
        }
        self.storage.save_roster(&self.roster)?;
        Ok(())
    }

    pub fn remove_skater(&mut self, id: &str) -> Result<Skater> {
        let removed = self
            .roster
            .remove(id)
            .ok_or_else(|| TournamentError::ParticipantNotFound(id.to_string()))?;
        self.storage.save_roster(&self.roster)?;
        Ok(removed)
    }

    // ========================
    // Sessions
    // ========================

    pub fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let ok = self.session.login(&self.roster, email, password);
        if ok {
            self.storage.save_session(&self.session)?;
        }
        Ok(ok)
    }

    pub fn admin_login(&mut self, password: &str) -> Result<bool> {
        let ok = self.session.admin_login(password);
        if ok {
            self.storage.save_session(&self.session)?;
        }
        Ok(ok)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout();
        self.storage.save_session(&self.session)?;
        Ok(())
    }

    pub fn admin_logout(&mut self) -> Result<()> {
        self.session.admin_logout();
        self.storage.save_session(&self.session)?;
        Ok(())
    }

    // ========================
    // Evaluations
    // ========================

    /// Submit one evaluation as the default judge. Requires an open
    /// administrator session.
    pub fn submit_evaluation(
        &mut self,
        stage_id: &str,
        participant_id: &str,
        score: u8,
        accepted: bool,
    ) -> Result<Evaluation> {
        self.submit_evaluation_by(stage_id, participant_id, score, accepted, DEFAULT_JUDGE)
    }

    /// Submit one evaluation under an explicit judge identifier.
    pub fn submit_evaluation_by(
        &mut self,
        stage_id: &str,
        participant_id: &str,
        score: u8,
        accepted: bool,
        evaluated_by: &str,
    ) -> Result<Evaluation> {
        if !self.session.is_admin() {
            return Err(TournamentError::Unauthorized);
        }

        let written = tournament::submit(
            &mut self.evaluations,
            &self.roster,
            stage_id,
            participant_id,
            score,
            accepted,
            evaluated_by,
        )?;
        self.storage.save_evaluations(&self.evaluations)?;
        Ok(written)
    }

    /// Evaluations for one stage, or the full log, in insertion order.
    pub fn list_evaluations(&self, stage_id: Option<&str>) -> Vec<Evaluation> {
        match stage_id {
            Some(stage) => self.evaluations.by_stage(stage).into_iter().cloned().collect(),
            None => self.evaluations.records().to_vec(),
        }
    }

    /// Drop every evaluation. Requires an administrator session; not part of
    /// the normal flow.
    pub fn reset_tournament(&mut self) -> Result<()> {
        if !self.session.is_admin() {
            return Err(TournamentError::Unauthorized);
        }
        self.evaluations.reset();
        self.storage.reset_evaluations()?;
        log::info!("Tournament evaluations reset");
        Ok(())
    }

    // ========================
    // Derived views
    // ========================

    pub fn generate_brackets(&self) -> Vec<StageBracket> {
        tournament::generate_brackets(&self.evaluations)
    }

    pub fn compute_statistics(&self) -> TournamentStatistics {
        tournament::compute_statistics(&self.evaluations, &self.roster)
    }

    pub fn registration_stats(&self, days: i64) -> RegistrationStats {
        tournament::registration_stats(&self.roster, days)
    }
}
