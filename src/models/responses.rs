use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredCandidate;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Outcome of a tag update, including the propagation fan-out summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTagsResponse {
    pub success: bool,
    pub update_id: String,
    pub propagation: PropagationSummary,
}

/// How the best-effort fan-out went; partial success is the normal case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropagationSummary {
    pub attempted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}
