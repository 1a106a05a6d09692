use crate::models::{DependentProfile, PropagationCaps, TagDelta};

/// Pick the tags to append to a dependent's existing set
///
/// Takes the first `cap` incoming tags not already present, in input order.
/// Existing tags are never touched, so dependent tag sets grow by at most
/// `cap` entries per update.
#[inline]
pub fn select_new_tags(existing: &[String], incoming: &[String], cap: usize) -> Vec<String> {
    incoming
        .iter()
        .filter(|tag| !existing.contains(tag))
        .take(cap)
        .cloned()
        .collect()
}

/// Plan the tag additions for one dependent record
///
/// `interests` / `goals` are the subject's updated tag sets; `None` means
/// that axis was not part of the update and is left alone. An empty delta
/// means no write is needed for this dependent.
pub fn plan_delta(
    dependent: &DependentProfile,
    interests: Option<&[String]>,
    goals: Option<&[String]>,
    caps: &PropagationCaps,
) -> TagDelta {
    TagDelta {
        interests: interests
            .map(|incoming| select_new_tags(&dependent.interests, incoming, caps.max_new_interests))
            .unwrap_or_default(),
        goals: goals
            .map(|incoming| select_new_tags(&dependent.goals, incoming, caps.max_new_goals))
            .unwrap_or_default(),
    }
}

/// Apply a delta to a dependent's current tags, producing the full new sets
///
/// The store expects whole-field writes, so the delta is appended to the
/// unchanged existing tags.
pub fn apply_delta(dependent: &DependentProfile, delta: &TagDelta) -> (Vec<String>, Vec<String>) {
    let mut interests = dependent.interests.clone();
    interests.extend(delta.interests.iter().cloned());

    let mut goals = dependent.goals.clone();
    goals.extend(delta.goals.iter().cloned());

    (interests, goals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn create_dependent(interests: &[&str], goals: &[&str]) -> DependentProfile {
        DependentProfile {
            dependent_id: "vh_1".to_string(),
            owner_id: "owner_1".to_string(),
            name: "Companion".to_string(),
            interests: tags(interests),
            goals: tags(goals),
        }
    }

    #[test]
    fn test_select_new_tags_caps_and_order() {
        let existing = tags(&["x", "y"]);
        let incoming = tags(&["y", "z", "w", "v"]);

        // "y" is already present; first 2 genuinely new tags in input order
        let selected = select_new_tags(&existing, &incoming, 2);
        assert_eq!(selected, tags(&["z", "w"]));
    }

    #[test]
    fn test_select_new_tags_under_cap() {
        let existing = tags(&["x"]);
        let incoming = tags(&["x", "y"]);

        let selected = select_new_tags(&existing, &incoming, 2);
        assert_eq!(selected, tags(&["y"]));
    }

    #[test]
    fn test_select_new_tags_all_present() {
        let existing = tags(&["x", "y"]);
        let incoming = tags(&["y", "x"]);

        assert!(select_new_tags(&existing, &incoming, 2).is_empty());
    }

    #[test]
    fn test_plan_delta_bounded_growth() {
        // Dependent with interests {x,y} and an update introducing {y,z,w}:
        // only "z" is appended (first new tag within the 2-interest cap after
        // filtering), goals gain at most one new tag.
        let dependent = create_dependent(&["x", "y"], &["g1"]);
        let interests = tags(&["y", "z", "w"]);
        let goals = tags(&["g1", "g2", "g3"]);

        let delta = plan_delta(
            &dependent,
            Some(&interests),
            Some(&goals),
            &PropagationCaps::default(),
        );

        assert_eq!(delta.interests, tags(&["z", "w"]));
        assert_eq!(delta.goals, tags(&["g2"]));
    }

    #[test]
    fn test_plan_delta_axis_not_updated() {
        let dependent = create_dependent(&["x"], &["g1"]);
        let interests = tags(&["a", "b"]);

        let delta = plan_delta(&dependent, Some(&interests), None, &PropagationCaps::default());

        assert_eq!(delta.interests, tags(&["a", "b"]));
        assert!(delta.goals.is_empty());
    }

    #[test]
    fn test_plan_delta_empty_when_nothing_new() {
        let dependent = create_dependent(&["x", "y"], &["g1"]);
        let interests = tags(&["x", "y"]);
        let goals = tags(&["g1"]);

        let delta = plan_delta(
            &dependent,
            Some(&interests),
            Some(&goals),
            &PropagationCaps::default(),
        );

        assert!(delta.is_empty());
    }

    #[test]
    fn test_apply_delta_preserves_existing_order() {
        let dependent = create_dependent(&["x", "y"], &["g1"]);
        let delta = TagDelta {
            interests: tags(&["z"]),
            goals: vec![],
        };

        let (interests, goals) = apply_delta(&dependent, &delta);

        assert_eq!(interests, tags(&["x", "y", "z"]));
        assert_eq!(goals, tags(&["g1"]));
    }
}
