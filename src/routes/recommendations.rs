use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{RecommendRequest, UpdateTagsRequest, RecommendResponse, HealthResponse, UpdateTagsResponse, ErrorResponse, PropagationCaps};
use crate::services::{propagate_tags, RecordsClient};
use crate::core::Recommender;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordsClient>,
    pub recommender: Recommender,
    pub caps: PropagationCaps,
    pub default_limit: u16,
    pub max_limit: u16,
    pub candidate_pool: usize,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations))
        .route("/subjects/tags", web::post().to(update_tags));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Check records API reachability
    let records_healthy = state.records.health_check().await.unwrap_or(false);

    let status = if records_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find similar subjects endpoint
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "subjectId": "string",
///   "limit": 5
/// }
/// ```
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let subject_id = &req.subject_id;
    // A zero limit is meaningless; fall back to the configured default
    let limit = if req.limit == 0 {
        state.default_limit
    } else {
        req.limit
    }
    .min(state.max_limit) as usize;

    tracing::info!("Finding recommendations for subject: {}, limit: {}", subject_id, limit);

    // Fetch the subject; an unknown id is the caller's error, not an empty result
    let subject = match state.records.get_subject(subject_id).await {
        Ok(subject) => subject,
        Err(e) if e.is_not_found() => {
            tracing::info!("Subject not found: {}", subject_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Subject not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch subject {}: {}", subject_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Records store unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    // No declared tags: a valid empty outcome, and no candidate fetch happens
    if !subject.has_comparison_basis() {
        tracing::debug!("Subject {} has no interests or goals", subject_id);
        return HttpResponse::Ok().json(RecommendResponse {
            recommendations: vec![],
            total_candidates: 0,
        });
    }

    // Fetch the bounded candidate pool; a store failure here is surfaced as
    // retryable, never collapsed into an empty result
    let candidates = match state
        .records
        .query_candidates(subject_id, &subject.interests, &subject.goals, state.candidate_pool)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", subject_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    tracing::debug!("Found {} candidates for {}", candidates.len(), subject_id);

    // Score and rank
    let result = state.recommender.rank(&subject, candidates, limit);

    let response = RecommendResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} recommendations for subject {} (from {} candidates)",
        response.recommendations.len(),
        subject_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Update a subject's tags and propagate to its virtual humans
///
/// POST /api/v1/subjects/tags
///
/// Request body:
/// ```json
/// {
///   "subjectId": "string",
///   "interests": ["string"],
///   "goals": ["string"]
/// }
/// ```
async fn update_tags(
    state: web::Data<AppState>,
    req: web::Json<UpdateTagsRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !req.has_updates() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "No updates supplied".to_string(),
            message: "At least one of interests or goals must be provided".to_string(),
            status_code: 400,
        });
    }

    let interests = req.interests.as_deref();
    let goals = req.goals.as_deref();

    // The subject write is the primary operation; it must succeed
    match state
        .records
        .update_subject_tags(&req.subject_id, interests, goals)
        .await
    {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Subject not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to update tags for {}: {}", req.subject_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to update subject tags".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    }

    // Best-effort fan-out to dependents; failures degrade the summary only
    let propagation = propagate_tags(
        Arc::clone(&state.records),
        &req.subject_id,
        interests,
        goals,
        &state.caps,
    )
    .await;

    HttpResponse::Ok().json(UpdateTagsResponse {
        success: true,
        update_id: uuid::Uuid::new_v4().to_string(),
        propagation,
    })
}
