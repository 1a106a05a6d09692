// Service exports
pub mod propagation;
pub mod records;

pub use propagation::propagate_tags;
pub use records::{RecordsClient, RecordsCollections, RecordsError};
