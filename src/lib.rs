//! taldlab: scoring engine for TALD-based diagnostic training.
//!
//! The crate compares a trainee's severity ratings against the ground-truth
//! clinical configuration of a simulated patient and produces a score plus
//! a deterministic written rationale. The 30-item disorder catalog, the
//! guided and exploratory session modes, and the penalty-subtraction
//! scoring model live in the library; the binary is a thin CLI over it.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod errors;
pub mod model;

pub use crate::catalog::{Catalog, DisorderDefinition, ItemKind};
pub use crate::comparison::{compare, ComparisonResult};
pub use crate::errors::TaldlabError;
pub use crate::model::{
    ClinicalConfiguration, ItemId, Mode, PerformanceLevel, Score, Severity, TraineeSubmission,
};
