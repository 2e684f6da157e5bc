//! Immutable value types consumed and produced by the comparison engine.

pub mod configuration;
pub mod scale;
pub mod submission;

pub use configuration::{ClinicalConfiguration, Mode};
pub use scale::{ItemId, PerformanceLevel, Score, Severity};
pub use submission::TraineeSubmission;
