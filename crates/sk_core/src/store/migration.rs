use super::error::StoreError;
use super::format::{EvaluationFile, RosterFile};
use super::STORE_VERSION;

/// Migrate a persisted evaluation log from older versions to the current one.
pub fn migrate_evaluations(mut file: EvaluationFile) -> Result<EvaluationFile, StoreError> {
    let original_version = file.version;

    file = match file.version {
        0 => migrate_evaluations_v0_to_v1(file)?,
        STORE_VERSION => file,
        v if v > STORE_VERSION => {
            // Future version - might be compatible
            log::warn!(
                "Loading evaluation log from future version {} (current: {})",
                v,
                STORE_VERSION
            );
            file
        }
        _ => {
            return Err(StoreError::VersionMismatch {
                found: file.version,
                expected: STORE_VERSION,
            });
        }
    };

    file.version = STORE_VERSION;

    if original_version != STORE_VERSION {
        log::info!("Migrated evaluation log from version {} to {}", original_version, STORE_VERSION);
    }

    Ok(file)
}

/// Version 0 blobs predate the hardened submission gate; repair what the old
/// writer could have let through.
fn migrate_evaluations_v0_to_v1(mut file: EvaluationFile) -> Result<EvaluationFile, StoreError> {
    log::info!("Migrating evaluation log from version 0 to 1");

    // 1. Fill the judge identifier where the old writer left it empty
    for evaluation in &mut file.evaluations {
        if evaluation.evaluated_by.is_empty() {
            evaluation.evaluated_by = "admin".to_string();
        }

        // 2. Clamp scores that escaped the 0-100 domain
        if evaluation.score > 100 {
            log::warn!(
                "Clamping out-of-range score {} for participant '{}'",
                evaluation.score,
                evaluation.participant_id
            );
            evaluation.score = 100;
        }
    }

    // 3. Collapse duplicated (stage, participant) pairs, keeping the most
    //    recent record in its original slot
    let mut deduped: Vec<crate::evaluation::Evaluation> = Vec::with_capacity(file.evaluations.len());
    for evaluation in file.evaluations.drain(..) {
        if let Some(existing) = deduped
            .iter_mut()
            .find(|e| e.stage == evaluation.stage && e.participant_id == evaluation.participant_id)
        {
            log::warn!(
                "Dropping duplicated evaluation for stage '{}' participant '{}'",
                evaluation.stage,
                evaluation.participant_id
            );
            if evaluation.evaluated_at >= existing.evaluated_at {
                *existing = evaluation;
            }
        } else {
            deduped.push(evaluation);
        }
    }
    file.evaluations = deduped;

    Ok(file)
}

/// Migrate a persisted roster from older versions to the current one.
pub fn migrate_roster(mut file: RosterFile) -> Result<RosterFile, StoreError> {
    let original_version = file.version;

    file = match file.version {
        0 => migrate_roster_v0_to_v1(file)?,
        STORE_VERSION => file,
        v if v > STORE_VERSION => {
            log::warn!("Loading roster from future version {} (current: {})", v, STORE_VERSION);
            file
        }
        _ => {
            return Err(StoreError::VersionMismatch {
                found: file.version,
                expected: STORE_VERSION,
            });
        }
    };

    file.version = STORE_VERSION;

    if original_version != STORE_VERSION {
        log::info!("Migrated roster from version {} to {}", original_version, STORE_VERSION);
    }

    Ok(file)
}

fn migrate_roster_v0_to_v1(mut file: RosterFile) -> Result<RosterFile, StoreError> {
    log::info!("Migrating roster from version 0 to 1");

    // 1. Repair inverted timestamps from v0 writers
    for skater in &mut file.skaters {
        if skater.updated_at < skater.created_at {
            skater.updated_at = skater.created_at;
        }
    }

    // 2. Drop duplicated ids, keeping the first occurrence
    let mut seen = std::collections::HashSet::new();
    file.skaters.retain(|s| {
        let fresh = seen.insert(s.id.clone());
        if !fresh {
            log::warn!("Dropping duplicated skater id '{}'", s.id);
        }
        fresh
    });

    Ok(file)
}

/// Check whether a persisted evaluation log needs migration.
pub fn needs_migration(version: u32) -> bool {
    version < STORE_VERSION
}
