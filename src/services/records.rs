use crate::models::{SubjectProfile, DependentProfile};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the records API
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl RecordsError {
    /// NotFound is a caller error; everything else is an upstream failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordsError::NotFound(_))
    }
}

/// VirtualSphere records API client
///
/// Handles all communication with the document store including:
/// - Fetching subject profiles
/// - Querying the candidate pool for recommendations
/// - Listing and updating dependent virtual-human records
pub struct RecordsClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: RecordsCollections,
}

/// Collection IDs in the records store
#[derive(Debug, Clone)]
pub struct RecordsCollections {
    pub subjects: String,
    pub dependents: String,
}

impl RecordsClient {
    /// Create a new records client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: RecordsCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    /// Fetch a single subject profile by subject ID
    pub async fn get_subject(&self, subject_id: &str) -> Result<SubjectProfile, RecordsError> {
        let queries = vec![format!("equal(\"subjectId\", \"{}\")", subject_id)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| RecordsError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}?query={}",
            self.collection_url(&self.collections.subjects),
            encoded_queries
        );

        tracing::debug!("Fetching subject: {}", subject_id);

        let response = self
            .client
            .get(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordsError::ApiError(format!(
                "Failed to fetch subject: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| RecordsError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents.first().ok_or_else(|| {
            RecordsError::NotFound(format!("Subject not found: {}", subject_id))
        })?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| RecordsError::InvalidResponse(format!("Failed to parse subject: {}", e)))
    }

    /// Query the candidate pool for a subject
    ///
    /// Returns other subjects whose interests intersect `interests` OR whose
    /// goals intersect `goals`, capped at `pool_cap`. Subjects with no
    /// overlap never enter the pool, even when it is under-filled.
    pub async fn query_candidates(
        &self,
        subject_id: &str,
        interests: &[String],
        goals: &[String],
        pool_cap: usize,
    ) -> Result<Vec<SubjectProfile>, RecordsError> {
        let mut queries = vec![format!("notEqual(\"subjectId\", \"{}\")", subject_id)];

        // Overlap filter: either tag axis may qualify a candidate
        let mut overlap_clauses = Vec::new();
        if !interests.is_empty() {
            overlap_clauses.push(format!("contains(\"interests\", {})", tag_array(interests)));
        }
        if !goals.is_empty() {
            overlap_clauses.push(format!("contains(\"goals\", {})", tag_array(goals)));
        }
        match overlap_clauses.len() {
            0 => {
                // No basis for comparison; callers short-circuit before this,
                // but an empty pool is the only correct answer anyway
                return Ok(vec![]);
            }
            1 => queries.push(overlap_clauses.remove(0)),
            _ => queries.push(format!("or({})", overlap_clauses.join(", "))),
        }

        queries.push(format!("limit({})", pool_cap));

        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| RecordsError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}?query={}",
            self.collection_url(&self.collections.subjects),
            encoded_queries
        );

        let response = self
            .client
            .get(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordsError::ApiError(format!(
                "Failed to query candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| RecordsError::InvalidResponse("Missing documents array".into()))?;

        let candidates: Vec<SubjectProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .filter(|c: &SubjectProfile| c.subject_id != subject_id)
            .take(pool_cap)
            .collect();

        tracing::debug!("Queried {} candidates (total: {})", candidates.len(), total);

        Ok(candidates)
    }

    /// List all dependent virtual-human records owned by a subject
    pub async fn list_dependents(
        &self,
        owner_id: &str,
    ) -> Result<Vec<DependentProfile>, RecordsError> {
        let queries = vec![format!("equal(\"ownerId\", \"{}\")", owner_id)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| RecordsError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}?query={}",
            self.collection_url(&self.collections.dependents),
            encoded_queries
        );

        let response = self
            .client
            .get(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordsError::ApiError(format!(
                "Failed to list dependents: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| RecordsError::InvalidResponse("Missing documents array".into()))?;

        let dependents: Vec<DependentProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!("Subject {} owns {} dependents", owner_id, dependents.len());

        Ok(dependents)
    }

    /// Replace a subject's tag sets
    ///
    /// Only the supplied axes are written; `None` leaves the stored value
    /// untouched. The store applies last-write-wins, no version checks here.
    pub async fn update_subject_tags(
        &self,
        subject_id: &str,
        interests: Option<&[String]>,
        goals: Option<&[String]>,
    ) -> Result<(), RecordsError> {
        let mut data = serde_json::Map::new();
        if let Some(interests) = interests {
            data.insert("interests".to_string(), json!(interests));
        }
        if let Some(goals) = goals {
            data.insert("goals".to_string(), json!(goals));
        }

        let url = format!(
            "{}/{}",
            self.collection_url(&self.collections.subjects),
            subject_id
        );

        let response = self
            .client
            .patch(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .json(&json!({ "data": data }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RecordsError::NotFound(format!(
                "Subject not found: {}",
                subject_id
            )));
        }
        if !status.is_success() {
            return Err(RecordsError::ApiError(format!(
                "Failed to update subject tags: {}",
                status
            )));
        }

        tracing::debug!("Updated tags for subject {}", subject_id);

        Ok(())
    }

    /// Write a dependent's full tag sets after a propagation delta
    pub async fn update_dependent_tags(
        &self,
        dependent_id: &str,
        interests: &[String],
        goals: &[String],
    ) -> Result<(), RecordsError> {
        let url = format!(
            "{}/{}",
            self.collection_url(&self.collections.dependents),
            dependent_id
        );

        let response = self
            .client
            .patch(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .json(&json!({
                "data": {
                    "interests": interests,
                    "goals": goals,
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordsError::ApiError(format!(
                "Failed to update dependent {}: {}",
                dependent_id,
                response.status()
            )));
        }

        tracing::debug!("Propagated tags to dependent {}", dependent_id);

        Ok(())
    }

    /// Best-effort health ping against the records API
    pub async fn health_check(&self) -> Result<bool, RecordsError> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("X-Records-Key", &self.api_key)
            .header("X-Records-Project", &self.project_id)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// Render a tag list as a JSON array for a query string
fn tag_array(tags: &[String]) -> String {
    let quoted = tags
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", quoted)
}
