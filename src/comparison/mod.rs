//! Submission-versus-ground-truth comparison.

pub mod engine;
pub mod rationale;
pub mod types;

pub use engine::compare;
pub use types::ComparisonResult;
