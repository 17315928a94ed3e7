//! Summary counters derived from the evaluation log and the roster.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationLog;
use crate::roster::Roster;

/// Tournament-wide counters for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStatistics {
    /// All evaluation records across all stages.
    pub total_evaluations: usize,

    /// Distinct participants with at least one evaluation.
    pub participants_evaluated: usize,

    /// Full roster size, irrespective of evaluation status.
    pub total_participants: usize,

    /// Distinct stages with at least one evaluation. Not compared against
    /// the catalog: one evaluation marks a stage "completed".
    pub stages_completed: usize,

    /// Mean score rounded to the nearest integer; 0 with no evaluations.
    pub average_score: u32,

    /// Percentage of accepted evaluations, rounded; 0 with no evaluations.
    pub acceptance_rate: u32,
}

/// Derive the dashboard counters from the current log and roster snapshot.
pub fn compute_statistics(log: &EvaluationLog, roster: &Roster) -> TournamentStatistics {
    let records = log.records();

    let participants: HashSet<&str> = records.iter().map(|e| e.participant_id.as_str()).collect();
    let stages: HashSet<&str> = records.iter().map(|e| e.stage.as_str()).collect();

    let (average_score, acceptance_rate) = if records.is_empty() {
        (0, 0)
    } else {
        let total: u32 = records.iter().map(|e| e.score as u32).sum();
        let accepted = records.iter().filter(|e| e.accepted).count();

        let average = (total as f64 / records.len() as f64).round() as u32;
        let rate = (accepted as f64 / records.len() as f64 * 100.0).round() as u32;
        (average, rate)
    };

    TournamentStatistics {
        total_evaluations: records.len(),
        participants_evaluated: participants.len(),
        total_participants: roster.len(),
        stages_completed: stages.len(),
        average_score,
        acceptance_rate,
    }
}

/// Registration counters for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStats {
    pub total_participants: usize,
    pub active_participants: usize,
    pub inactive_participants: usize,
    pub recent_registrations: usize,
}

/// Roster-side counters; `days` bounds the recent-registration window.
pub fn registration_stats(roster: &Roster, days: i64) -> RegistrationStats {
    let active = roster.list_active().len();
    RegistrationStats {
        total_participants: roster.len(),
        active_participants: active,
        inactive_participants: roster.len() - active,
        recent_registrations: roster.recent_registrations(days),
    }
}
