use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find similar subjects
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "subject_id", rename = "subjectId")]
    pub subject_id: String,
    #[serde(default = "default_limit")]
    #[serde(alias = "limit", rename = "limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    5
}

/// Request to replace a subject's tag sets and propagate to dependents
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTagsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "subject_id", rename = "subjectId")]
    pub subject_id: String,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
}

impl UpdateTagsRequest {
    /// At least one tag set must be supplied for the update to mean anything
    pub fn has_updates(&self) -> bool {
        self.interests.is_some() || self.goals.is_some()
    }
}
