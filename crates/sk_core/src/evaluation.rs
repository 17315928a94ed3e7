//! Stage evaluation records and the append/update log that owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One judge-submitted score and accept/reject decision for one participant
/// in one stage.
///
/// `participant_name` is a snapshot taken at write time for display
/// stability; it is not resynced if the skater is later renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Unique id, stable across updates to the same (stage, participant) pair.
    pub id: String,

    /// Stage key from the catalog.
    pub stage: String,

    /// Participant id from the roster.
    pub participant_id: String,

    /// Name snapshot taken when the evaluation was written.
    pub participant_name: String,

    /// Score in 0..=100.
    pub score: u8,

    /// Judge's advancement decision, independent of any threshold.
    pub accepted: bool,

    /// Refreshed on every write.
    pub evaluated_at: DateTime<Utc>,

    /// Judge identifier.
    pub evaluated_by: String,
}

/// Append/update log of evaluations, insertion-ordered.
///
/// Invariant: at most one record per (stage, participant) pair. A
/// resubmission for an existing pair updates the record in place, keeping its
/// id. Records are never deleted in normal operation; the only destructive
/// operation is a whole-log [`reset`](EvaluationLog::reset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationLog {
    records: Vec<Evaluation>,
}

impl EvaluationLog {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn from_records(records: Vec<Evaluation>) -> Self {
        Self { records }
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Evaluation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one stage, in insertion order.
    pub fn by_stage(&self, stage_id: &str) -> Vec<&Evaluation> {
        self.records.iter().filter(|e| e.stage == stage_id).collect()
    }

    /// Records for one participant across all stages.
    pub fn by_participant(&self, participant_id: &str) -> Vec<&Evaluation> {
        self.records.iter().filter(|e| e.participant_id == participant_id).collect()
    }

    /// The record for a (stage, participant) pair, if one exists.
    pub fn find(&self, stage_id: &str, participant_id: &str) -> Option<&Evaluation> {
        self.records.iter().find(|e| e.stage == stage_id && e.participant_id == participant_id)
    }

    /// Insert or update the record for a (stage, participant) pair.
    ///
    /// An existing record keeps its id; score, accepted flag and name
    /// snapshot are replaced and `evaluated_at` is refreshed. Returns a copy
    /// of the written record.
    pub fn upsert(
        &mut self,
        stage_id: &str,
        participant_id: &str,
        participant_name: &str,
        score: u8,
        accepted: bool,
        evaluated_by: &str,
    ) -> Evaluation {
        let now = Utc::now();

        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|e| e.stage == stage_id && e.participant_id == participant_id)
        {
            existing.participant_name = participant_name.to_string();
            existing.score = score;
            existing.accepted = accepted;
            existing.evaluated_at = now;
            existing.evaluated_by = evaluated_by.to_string();
            return existing.clone();
        }

        let evaluation = Evaluation {
            id: Uuid::new_v4().to_string(),
            stage: stage_id.to_string(),
            participant_id: participant_id.to_string(),
            participant_name: participant_name.to_string(),
            score,
            accepted,
            evaluated_at: now,
            evaluated_by: evaluated_by.to_string(),
        };
        self.records.push(evaluation.clone());
        evaluation
    }

    /// Drop every record. Not part of the normal flow.
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

impl From<EvaluationLog> for Vec<Evaluation> {
    fn from(log: EvaluationLog) -> Self {
        log.records
    }
}
