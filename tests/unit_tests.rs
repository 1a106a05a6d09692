// Unit tests for VirtualSphere Affinity

use virtualsphere_affinity::core::{
    propagation::{plan_delta, select_new_tags},
    similarity::{calculate_similarity, has_overlap, overlap_ratio},
};
use virtualsphere_affinity::models::{DependentProfile, PropagationCaps, SimilarityWeights, SubjectProfile};

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn subject(id: &str, interests: &[&str], goals: &[&str]) -> SubjectProfile {
    SubjectProfile {
        subject_id: id.to_string(),
        username: format!("user_{}", id),
        full_name: None,
        profile_image: None,
        bio: None,
        interests: tags(interests),
        goals: tags(goals),
        created_at: None,
    }
}

fn dependent(id: &str, interests: &[&str], goals: &[&str]) -> DependentProfile {
    DependentProfile {
        dependent_id: id.to_string(),
        owner_id: "owner".to_string(),
        name: format!("Companion {}", id),
        interests: tags(interests),
        goals: tags(goals),
    }
}

#[test]
fn test_overlap_ratio_identical_sets() {
    let a = tags(&["a", "b"]);
    let ratio = overlap_ratio(&a, &a);
    assert!((ratio - 1.0).abs() < 1e-9);
}

#[test]
fn test_overlap_ratio_disjoint_sets() {
    let a = tags(&["a", "b"]);
    let b = tags(&["c", "d"]);
    assert_eq!(overlap_ratio(&a, &b), 0.0);
}

#[test]
fn test_overlap_ratio_ignores_order() {
    let a = tags(&["a", "b", "c"]);
    let b = tags(&["c", "a", "b"]);
    assert!((overlap_ratio(&a, &b) - 1.0).abs() < 1e-9);
}

#[test]
fn test_similarity_worked_example() {
    // interests {a,b,c} vs {b,c,d}, no goals:
    // interest_score = 2/3, goal_score = 0, similarity = 0.6 * 2/3 = 0.4
    let s = subject("s", &["a", "b", "c"], &[]);
    let c = subject("c", &["b", "c", "d"], &[]);

    let score = calculate_similarity(&s, &c, &SimilarityWeights::default());
    assert!((score - 0.4).abs() < 1e-6);
}

#[test]
fn test_similarity_goals_only() {
    let s = subject("s", &[], &["x", "y"]);
    let c = subject("c", &[], &["x", "y"]);

    let score = calculate_similarity(&s, &c, &SimilarityWeights::default());
    assert!((score - 0.4).abs() < 1e-9);
}

#[test]
fn test_similarity_always_in_unit_range() {
    let s = subject("s", &["a", "b", "c"], &["x"]);
    let candidates = vec![
        subject("1", &["a", "b", "c"], &["x"]),
        subject("2", &["a"], &[]),
        subject("3", &[], &["x"]),
        subject("4", &["a", "b", "c", "d", "e"], &["x", "y", "z"]),
    ];

    for c in &candidates {
        let score = calculate_similarity(&s, c, &SimilarityWeights::default());
        assert!(
            score >= 0.0 && score <= 1.0,
            "Score {} out of range for candidate {}",
            score,
            c.subject_id
        );
    }
}

#[test]
fn test_has_overlap_either_axis() {
    let s = subject("s", &["a"], &["x"]);

    assert!(has_overlap(&s, &subject("1", &["a"], &[])));
    assert!(has_overlap(&s, &subject("2", &[], &["x"])));
    assert!(!has_overlap(&s, &subject("3", &["b"], &["y"])));
}

#[test]
fn test_select_new_tags_respects_cap_and_order() {
    let existing = tags(&["x", "y"]);
    let incoming = tags(&["y", "z", "w", "v"]);

    assert_eq!(select_new_tags(&existing, &incoming, 2), tags(&["z", "w"]));
    assert_eq!(select_new_tags(&existing, &incoming, 1), tags(&["z"]));
}

#[test]
fn test_plan_delta_bounded_growth_fixture() {
    // Dependent {x,y} interests, {g1} goals; update brings {y,z,w} / {g1,g2,g3}.
    // Interests gain the first 2 genuinely new tags, goals gain 1.
    let vh = dependent("vh_1", &["x", "y"], &["g1"]);
    let interests = tags(&["y", "z", "w"]);
    let goals = tags(&["g1", "g2", "g3"]);

    let delta = plan_delta(&vh, Some(&interests), Some(&goals), &PropagationCaps::default());

    assert_eq!(delta.interests, tags(&["z", "w"]));
    assert_eq!(delta.goals, tags(&["g2"]));
}

#[test]
fn test_plan_delta_never_removes_existing() {
    let vh = dependent("vh_1", &["x", "y"], &["g1"]);
    let interests = tags(&["z"]);

    let delta = plan_delta(&vh, Some(&interests), None, &PropagationCaps::default());

    // The delta only appends; existing tags are untouched by construction
    assert_eq!(delta.interests, tags(&["z"]));
    assert!(delta.goals.is_empty());
    assert_eq!(vh.interests, tags(&["x", "y"]));
    assert_eq!(vh.goals, tags(&["g1"]));
}

#[test]
fn test_plan_delta_custom_caps() {
    let vh = dependent("vh_1", &[], &[]);
    let interests = tags(&["a", "b", "c", "d"]);
    let goals = tags(&["x", "y", "z"]);
    let caps = PropagationCaps {
        max_new_interests: 3,
        max_new_goals: 2,
    };

    let delta = plan_delta(&vh, Some(&interests), Some(&goals), &caps);

    assert_eq!(delta.interests, tags(&["a", "b", "c"]));
    assert_eq!(delta.goals, tags(&["x", "y"]));
}
