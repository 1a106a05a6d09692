// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{SubjectProfile, DependentProfile, ScoredCandidate, SimilarityWeights, PropagationCaps, TagDelta};
pub use requests::{RecommendRequest, UpdateTagsRequest};
pub use responses::{RecommendResponse, HealthResponse, ErrorResponse, UpdateTagsResponse, PropagationSummary};
