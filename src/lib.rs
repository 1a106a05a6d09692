//! VirtualSphere Affinity - similarity recommendation service
//!
//! This library provides the tag-overlap recommendation algorithm used by the
//! VirtualSphere platform, plus the bounded interest propagation that keeps a
//! subject's virtual humans loosely in sync with their owner.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Recommender, calculate_similarity, overlap_ratio};
pub use models::{SubjectProfile, DependentProfile, ScoredCandidate, SimilarityWeights, PropagationCaps, RecommendRequest, RecommendResponse};
