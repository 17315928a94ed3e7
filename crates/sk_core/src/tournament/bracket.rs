//! Bracket generation: ranked standings and the stage winner, derived from
//! the evaluation log.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::evaluation::{Evaluation, EvaluationLog};

/// One ranked participant within a stage bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketEntry {
    pub id: String,
    pub name: String,
    pub score: u8,
    pub accepted: bool,
    /// 1-based rank. Tied scores still get distinct consecutive positions.
    pub position: u32,
}

/// The derived, ranked view of one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBracket {
    /// Stage display name.
    pub stage: String,

    /// Participants in rank order.
    pub participants: Vec<BracketEntry>,

    /// Participant id at position 1, only when that participant was accepted.
    /// There is deliberately no fallback to position 2: "winner" means
    /// strictly "top scorer who was also approved".
    pub winner: Option<String>,
}

/// Derive one bracket per catalog stage, in catalog order.
///
/// Ranking is by score descending; ties break deterministically by earlier
/// `evaluated_at` first, then by participant id, so the output does not
/// depend on log insertion order.
pub fn generate_brackets(log: &EvaluationLog) -> Vec<StageBracket> {
    catalog::stages()
        .iter()
        .map(|stage| {
            let mut stage_evaluations: Vec<&Evaluation> = log.by_stage(&stage.id);
            stage_evaluations.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.evaluated_at.cmp(&b.evaluated_at))
                    .then_with(|| a.participant_id.cmp(&b.participant_id))
            });

            let participants: Vec<BracketEntry> = stage_evaluations
                .iter()
                .enumerate()
                .map(|(index, evaluation)| BracketEntry {
                    id: evaluation.participant_id.clone(),
                    name: evaluation.participant_name.clone(),
                    score: evaluation.score,
                    accepted: evaluation.accepted,
                    position: index as u32 + 1,
                })
                .collect();

            let winner =
                participants.first().filter(|p| p.accepted).map(|p| p.id.clone());

            StageBracket { stage: stage.name.clone(), participants, winner }
        })
        .collect()
}
