//! Evaluation submission gate.
//!
//! Validates one (stage, participant, score, accept) tuple and upserts it
//! into the log. The one-record-per-pair invariant is maintained
//! structurally by the upsert; a resubmission is not an error.

use crate::catalog;
use crate::error::{Result, TournamentError};
use crate::evaluation::{Evaluation, EvaluationLog};
use crate::roster::Roster;

/// Validate and upsert one evaluation. Returns a copy of the written record.
///
/// Rejections:
/// - score above 100 (`Validation`);
/// - stage id not in the catalog (`StageNotFound`);
/// - participant unknown or inactive (`ParticipantNotFound`).
///
/// The catalog's `min_score` / `max_participants` stay advisory: crossing
/// them is logged for the judge but never rejected here.
pub fn submit(
    log: &mut EvaluationLog,
    roster: &Roster,
    stage_id: &str,
    participant_id: &str,
    score: u8,
    accepted: bool,
    evaluated_by: &str,
) -> Result<Evaluation> {
    let stage = catalog::find_stage(stage_id)
        .ok_or_else(|| TournamentError::StageNotFound(stage_id.to_string()))?;

    let skater = roster
        .get(participant_id)
        .filter(|s| s.active)
        .ok_or_else(|| TournamentError::ParticipantNotFound(participant_id.to_string()))?;

    if score > 100 {
        return Err(TournamentError::Validation(format!(
            "score must be between 0 and 100, got {score}"
        )));
    }

    if let Some(min_score) = stage.min_score {
        if accepted && score < min_score {
            log::warn!(
                "Accepting '{}' in stage '{}' with score {} below the advisory threshold {}",
                skater.name,
                stage.id,
                score,
                min_score
            );
        }
    }

    if let Some(max) = stage.max_participants {
        let evaluated = log.by_stage(stage_id).len();
        let is_new = log.find(stage_id, participant_id).is_none();
        if is_new && evaluated as u32 >= max {
            log::warn!(
                "Stage '{}' already has {} evaluations, above its advisory cap {}",
                stage.id,
                evaluated,
                max
            );
        }
    }

    let written = log.upsert(stage_id, participant_id, &skater.name, score, accepted, evaluated_by);
    log::info!(
        "Recorded evaluation for '{}' in stage '{}': score {}, accepted {}",
        written.participant_name,
        written.stage,
        written.score,
        written.accepted
    );
    Ok(written)
}
