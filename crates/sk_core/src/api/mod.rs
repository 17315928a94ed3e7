pub mod json_api;

pub use json_api::{
    generate_brackets_json, statistics_json, submit_evaluation_json, BracketsResponse,
    EvaluationRequest, EvaluationResponse, StatisticsResponse,
};
