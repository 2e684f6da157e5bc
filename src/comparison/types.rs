//! Structured outcome of a comparison.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::scale::{ItemId, Score};
use crate::model::Mode;

/// Outcome of comparing a trainee submission against the ground truth.
///
/// The three classification sets are pairwise disjoint by construction.
/// `severity_deltas` covers the agreed-upon positives (and in guided mode
/// always the studied disorder). Immutable once produced; the engine
/// returns bit-identical results for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub mode: Mode,
    /// Present in both ground truth and submission (severity > 0).
    pub true_positives: BTreeSet<ItemId>,
    /// Flagged by the trainee but absent from the ground truth.
    pub false_positives: BTreeSet<ItemId>,
    /// Present in the ground truth but missed by the trainee.
    pub false_negatives: BTreeSet<ItemId>,
    /// Absolute severity differences for agreed-upon positives.
    pub severity_deltas: BTreeMap<ItemId, u8>,
    /// Diagnostic performance, 0-100.
    pub score: Score,
    /// Human-readable summary of the above. Purely descriptive.
    pub rationale: String,
}

impl ComparisonResult {
    /// Whether the trainee achieved the maximum score.
    pub fn is_perfect(&self) -> bool {
        self.score.is_perfect()
    }

    /// Total number of classification errors (misses plus false alarms).
    pub fn error_count(&self) -> usize {
        self.false_negatives.len() + self.false_positives.len()
    }
}
