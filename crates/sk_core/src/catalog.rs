//! Static tournament stage catalog.
//!
//! The stage sequence is a process-wide constant: five elimination rounds,
//! ordered by `order`. `max_participants` and `min_score` are advisory limits
//! for the judges; the submission gate logs when they are exceeded but never
//! enforces them automatically.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One sequential round of the tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique stage key, referenced by evaluations.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rank in the stage sequence (ascending, unique).
    pub order: u32,

    /// Advisory cap on evaluated participants for this stage.
    pub max_participants: Option<u32>,

    /// Advisory advancement threshold. Acceptance stays a judge decision.
    pub min_score: Option<u8>,
}

impl Stage {
    fn new(
        id: &str,
        name: &str,
        order: u32,
        max_participants: Option<u32>,
        min_score: Option<u8>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            order,
            max_participants,
            min_score,
        }
    }
}

/// The fixed stage sequence of the competition, in `order`.
pub static TOURNAMENT_STAGES: Lazy<Vec<Stage>> = Lazy::new(|| {
    vec![
        Stage::new("clasificatoria", "Clasificatoria", 1, Some(16), Some(60)),
        Stage::new("octavos", "Octavos de Final", 2, Some(16), Some(65)),
        Stage::new("cuartos", "Cuartos de Final", 3, Some(8), Some(70)),
        Stage::new("semifinal", "Semifinal", 4, Some(4), Some(75)),
        Stage::new("final", "Final", 5, Some(2), Some(80)),
    ]
});

/// All stages in catalog order.
pub fn stages() -> &'static [Stage] {
    &TOURNAMENT_STAGES
}

/// Look up a stage by its id.
pub fn find_stage(id: &str) -> Option<&'static Stage> {
    TOURNAMENT_STAGES.iter().find(|s| s.id == id)
}
