use crate::core::propagation::{apply_delta, plan_delta};
use crate::models::{PropagationCaps, PropagationSummary};
use crate::services::records::RecordsClient;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fan out a subject tag update to its dependent virtual-human records
///
/// Each dependent gets at most `caps.max_new_interests` new interest tags and
/// `caps.max_new_goals` new goal tags, chosen in input order. All writes run
/// concurrently and independently; a failed write is logged and counted but
/// never stops the others or the caller. Partial success is the normal case.
pub async fn propagate_tags(
    records: Arc<RecordsClient>,
    owner_id: &str,
    interests: Option<&[String]>,
    goals: Option<&[String]>,
    caps: &PropagationCaps,
) -> PropagationSummary {
    let mut summary = PropagationSummary::default();

    let dependents = match records.list_dependents(owner_id).await {
        Ok(dependents) => dependents,
        Err(e) => {
            // Listing failure degrades the summary, never the primary update
            tracing::warn!("Failed to list dependents for {}: {}", owner_id, e);
            return summary;
        }
    };

    if dependents.is_empty() {
        return summary;
    }

    let mut writes = JoinSet::new();

    for dependent in dependents {
        let delta = plan_delta(&dependent, interests, goals, caps);

        if delta.is_empty() {
            summary.skipped += 1;
            continue;
        }

        summary.attempted += 1;

        let (new_interests, new_goals) = apply_delta(&dependent, &delta);
        let records = Arc::clone(&records);
        let dependent_id = dependent.dependent_id.clone();

        writes.spawn(async move {
            let result = records
                .update_dependent_tags(&dependent_id, &new_interests, &new_goals)
                .await;
            (dependent_id, result)
        });
    }

    // Await the whole fan-out before considering the update cycle complete
    while let Some(joined) = writes.join_next().await {
        match joined {
            Ok((_, Ok(()))) => summary.updated += 1,
            Ok((dependent_id, Err(e))) => {
                tracing::warn!("Failed to propagate tags to dependent {}: {}", dependent_id, e);
                summary.failed += 1;
            }
            Err(e) => {
                tracing::warn!("Propagation task panicked: {}", e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Propagated tags for {}: {} updated, {} skipped, {} failed",
        owner_id,
        summary.updated,
        summary.skipped,
        summary.failed
    );

    summary
}
