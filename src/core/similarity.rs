use crate::models::{SubjectProfile, SimilarityWeights};

/// Calculate a similarity score (0-1) between a subject and a candidate
///
/// Scoring formula:
/// score = (
///     interest_score * 0.6 +       # Shared interest tags
///     goal_score * 0.4             # Shared goal tags
/// )
///
/// Each component is the intersection size divided by the larger of the two
/// tag sets, so a candidate with many unrelated tags scores lower than one
/// whose tags closely mirror the subject's.
pub fn calculate_similarity(
    subject: &SubjectProfile,
    candidate: &SubjectProfile,
    weights: &SimilarityWeights,
) -> f64 {
    let interest_score = overlap_ratio(&subject.interests, &candidate.interests);
    let goal_score = overlap_ratio(&subject.goals, &candidate.goals);

    let score = interest_score * weights.interests + goal_score * weights.goals;

    score.clamp(0.0, 1.0)
}

/// Overlap ratio (0-1) between two tag sets
///
/// |a ∩ b| / max(|a|, |b|), or 0 when either set is empty.
/// Tag order is irrelevant; comparison is exact string equality.
#[inline]
pub fn overlap_ratio(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let shared = b.iter().filter(|tag| a.contains(tag)).count();

    shared as f64 / a.len().max(b.len()) as f64
}

/// Whether a candidate shares at least one tag on either axis
///
/// Candidates with no overlap at all never enter the scoring pass, even when
/// the candidate pool is under-filled.
#[inline]
pub fn has_overlap(subject: &SubjectProfile, candidate: &SubjectProfile) -> bool {
    candidate
        .interests
        .iter()
        .any(|tag| subject.interests.contains(tag))
        || candidate.goals.iter().any(|tag| subject.goals.contains(tag))
}
