use crate::models::{SubjectProfile, ScoredCandidate, SimilarityWeights};
use crate::core::similarity::{calculate_similarity, has_overlap};

/// Result of the recommendation pass
#[derive(Debug)]
pub struct RecommendResult {
    pub recommendations: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Recommendation orchestrator - scores and ranks a candidate pool
///
/// # Pipeline Stages
/// 1. Self-exclusion and zero-overlap filtering
/// 2. Weighted tag-overlap scoring
/// 3. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: SimilarityWeights,
}

impl Recommender {
    pub fn new(weights: SimilarityWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: SimilarityWeights::default(),
        }
    }

    /// Rank candidates by similarity to the subject
    ///
    /// This is a pure function over its inputs: the candidate pool has already
    /// been fetched, and nothing is mutated or cached here.
    ///
    /// # Arguments
    /// * `subject` - The subject requesting recommendations
    /// * `candidates` - Candidate pool from the records store
    /// * `limit` - Maximum number of recommendations to return
    ///
    /// # Returns
    /// RecommendResult with candidates scored and sorted by descending
    /// similarity. Sorting is stable, so pool order breaks ties.
    pub fn rank(
        &self,
        subject: &SubjectProfile,
        candidates: Vec<SubjectProfile>,
        limit: usize,
    ) -> RecommendResult {
        // No declared tags means no meaningful basis for comparison
        if !subject.has_comparison_basis() {
            return RecommendResult {
                recommendations: vec![],
                total_candidates: 0,
            };
        }

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            // The store query excludes self, but never trust it blindly
            .filter(|candidate| candidate.subject_id != subject.subject_id)
            .filter(|candidate| has_overlap(subject, candidate))
            .map(|candidate| {
                let score = calculate_similarity(subject, &candidate, &self.weights);

                ScoredCandidate {
                    subject_id: candidate.subject_id,
                    username: candidate.username,
                    full_name: candidate.full_name,
                    profile_image: candidate.profile_image,
                    bio: candidate.bio,
                    interests: candidate.interests,
                    goals: candidate.goals,
                    similarity_score: score,
                }
            })
            .collect();

        let total_candidates = scored.len();

        // Stable sort by score (descending); insertion order breaks ties
        scored.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(limit);

        RecommendResult {
            recommendations: scored,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
