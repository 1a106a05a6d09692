// Core algorithm exports
pub mod propagation;
pub mod recommender;
pub mod similarity;

pub use propagation::{select_new_tags, plan_delta, apply_delta};
pub use recommender::{Recommender, RecommendResult};
pub use similarity::{calculate_similarity, overlap_ratio, has_overlap};
