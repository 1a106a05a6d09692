use serde::{Deserialize, Serialize};

/// Subject profile with declared interest and goal tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProfile {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub username: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SubjectProfile {
    /// A subject with neither interests nor goals gives no basis for comparison
    pub fn has_comparison_basis(&self) -> bool {
        !self.interests.is_empty() || !self.goals.is_empty()
    }
}

/// Virtual-human record owned by a subject, target of bounded tag propagation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependentProfile {
    #[serde(rename = "dependentId")]
    pub dependent_id: String,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Candidate paired with its computed similarity, built fresh per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
}

/// Weights for combining interest and goal overlap into one score
#[derive(Debug, Clone, Copy)]
pub struct SimilarityWeights {
    pub interests: f64,
    pub goals: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            interests: 0.6,
            goals: 0.4,
        }
    }
}

/// Per-update caps on how many new tags reach a dependent record
#[derive(Debug, Clone, Copy)]
pub struct PropagationCaps {
    pub max_new_interests: usize,
    pub max_new_goals: usize,
}

impl Default for PropagationCaps {
    fn default() -> Self {
        Self {
            max_new_interests: 2,
            max_new_goals: 1,
        }
    }
}

/// Tags to append to a single dependent record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagDelta {
    pub interests: Vec<String>,
    pub goals: Vec<String>,
}

impl TagDelta {
    pub fn is_empty(&self) -> bool {
        self.interests.is_empty() && self.goals.is_empty()
    }
}
