//! JSON facade for embedding hosts.
//!
//! Requests and responses carry a `schema_version` so hosts can detect
//! incompatible payloads instead of misreading them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};
use crate::evaluation::Evaluation;
use crate::service::{TournamentService, DEFAULT_JUDGE};
use crate::tournament::{StageBracket, TournamentStatistics};

pub const API_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub schema_version: u8,
    pub stage: String,
    pub participant_id: String,
    pub score: u8,
    pub accepted: bool,
    /// Judge identifier; defaults to the fixed admin judge.
    #[serde(default)]
    pub evaluated_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub schema_version: u8,
    pub evaluation: Evaluation,
}

#[derive(Debug, Serialize)]
pub struct BracketsResponse {
    pub schema_version: u8,
    pub brackets: Vec<StageBracket>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub schema_version: u8,
    pub statistics: TournamentStatistics,
}

fn check_schema_version(found: u8) -> Result<()> {
    if found != API_SCHEMA_VERSION {
        return Err(TournamentError::Validation(format!(
            "unsupported schema_version {found}, expected {API_SCHEMA_VERSION}"
        )));
    }
    Ok(())
}

/// Parse and submit one evaluation; returns the written record as JSON.
pub fn submit_evaluation_json(service: &mut TournamentService, request: &str) -> Result<String> {
    let request: EvaluationRequest = serde_json::from_str(request)?;
    check_schema_version(request.schema_version)?;

    let judge = request.evaluated_by.as_deref().unwrap_or(DEFAULT_JUDGE);
    let evaluation = service.submit_evaluation_by(
        &request.stage,
        &request.participant_id,
        request.score,
        request.accepted,
        judge,
    )?;

    let response = EvaluationResponse { schema_version: API_SCHEMA_VERSION, evaluation };
    Ok(serde_json::to_string(&response)?)
}

/// All stage brackets, in catalog order, as JSON.
pub fn generate_brackets_json(service: &TournamentService) -> Result<String> {
    let response = BracketsResponse {
        schema_version: API_SCHEMA_VERSION,
        brackets: service.generate_brackets(),
    };
    Ok(serde_json::to_string(&response)?)
}

/// The dashboard statistics as JSON.
pub fn statistics_json(service: &TournamentService) -> Result<String> {
    let response = StatisticsResponse {
        schema_version: API_SCHEMA_VERSION,
        statistics: service.compute_statistics(),
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{SkateSpecialty, Skater};
    use crate::session::ADMIN_PASSWORD;
    use serde_json::json;
    use tempfile::TempDir;

    fn service_with_admin() -> (TempDir, TournamentService, String) {
        let dir = TempDir::new().unwrap();
        let mut service = TournamentService::open(dir.path()).unwrap();

        let skater = Skater::new(
            "Alice",
            "alice@example.com",
            "secret1",
            5,
            SkateSpecialty::Street,
            20,
            "Chile",
        );
        let id = skater.id.clone();
        service.register_skater(skater).unwrap();
        service.admin_login(ADMIN_PASSWORD).unwrap();
        (dir, service, id)
    }

    #[test]
    fn test_submit_evaluation_json_roundtrip() {
        let (_dir, mut service, id) = service_with_admin();

        let request = json!({
            "schema_version": 1,
            "stage": "clasificatoria",
            "participant_id": id,
            "score": 85,
            "accepted": true
        });

        let response = submit_evaluation_json(&mut service, &request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["evaluation"]["score"], 85);
        assert_eq!(parsed["evaluation"]["participant_name"], "Alice");
        assert_eq!(parsed["evaluation"]["evaluated_by"], "admin");
    }

    #[test]
    fn test_unsupported_schema_version_rejected() {
        let (_dir, mut service, id) = service_with_admin();

        let request = json!({
            "schema_version": 9,
            "stage": "clasificatoria",
            "participant_id": id,
            "score": 85,
            "accepted": true
        });

        let result = submit_evaluation_json(&mut service, &request.to_string());
        assert!(matches!(result, Err(TournamentError::Validation(_))));
    }

    #[test]
    fn test_malformed_request_rejected() {
        let (_dir, mut service, _) = service_with_admin();

        let result = submit_evaluation_json(&mut service, "{\"schema_version\":");
        assert!(result.is_err());
    }

    #[test]
    fn test_brackets_and_statistics_json() {
        let (_dir, mut service, id) = service_with_admin();

        let request = json!({
            "schema_version": 1,
            "stage": "clasificatoria",
            "participant_id": id,
            "score": 85,
            "accepted": true,
            "evaluated_by": "judge-2"
        });
        submit_evaluation_json(&mut service, &request.to_string()).unwrap();

        let brackets: serde_json::Value =
            serde_json::from_str(&generate_brackets_json(&service).unwrap()).unwrap();
        assert_eq!(brackets["brackets"].as_array().unwrap().len(), 5);
        assert_eq!(brackets["brackets"][0]["winner"], id.as_str());
        assert_eq!(brackets["brackets"][0]["participants"][0]["position"], 1);

        let stats: serde_json::Value =
            serde_json::from_str(&statistics_json(&service).unwrap()).unwrap();
        assert_eq!(stats["statistics"]["total_evaluations"], 1);
        assert_eq!(stats["statistics"]["average_score"], 85);
        assert_eq!(stats["statistics"]["acceptance_rate"], 100);
    }
}
