//! Type-safe vocabulary of the TALD rating scale.
//!
//! This module provides newtype wrappers for the three numeric scales the
//! system works with. By encoding the range in the type system, a severity
//! can never be mistaken for an item id or a score.
//!
//! # Scales
//!
//! - `ItemId`: catalog identifier, 1-30
//! - `Severity`: rating level, 0 (absent) to 4 (severe)
//! - `Score`: diagnostic performance, 0-100
//!
//! `ItemId` and `Severity` reject out-of-range values at construction.
//! `Score` is the single place in the crate where out-of-range arithmetic
//! is clamped instead of rejected: the scoring formula should never leave
//! the range by construction, and the clamp is the last-resort invariant.
//!
//! # Examples
//!
//! ```rust
//! use taldlab::model::scale::{ItemId, Score, Severity};
//!
//! let id = ItemId::new(7).unwrap();
//! assert_eq!(id.get(), 7);
//! assert!(ItemId::new(31).is_err());
//!
//! let severe = Severity::new(4).unwrap();
//! let absent = Severity::NONE;
//! assert_eq!(severe.delta(absent), 4);
//!
//! // Out-of-bounds score arithmetic is clamped
//! assert_eq!(Score::from_points(-20.0).value(), 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::TaldlabError;

/// Identifier of one of the 30 catalogued disorders.
///
/// Valid range is 1..=30, matching the TALD manual. `Ord` is derived so
/// that `BTreeMap`/`BTreeSet` keyed by `ItemId` iterate in ascending id
/// order, which is the ordering the rationale text relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ItemId(u8);

impl ItemId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 30;

    /// Create an item id, rejecting values outside 1..=30.
    pub fn new(raw: u8) -> Result<Self, TaldlabError> {
        if (Self::MIN..=Self::MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(TaldlabError::ItemIdOutOfRange(raw))
        }
    }

    /// Get the raw id.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All 30 ids in ascending order.
    pub fn all() -> impl Iterator<Item = ItemId> {
        (Self::MIN..=Self::MAX).map(ItemId)
    }
}

impl TryFrom<u8> for ItemId {
    type Error = TaldlabError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for u8 {
    fn from(id: ItemId) -> u8 {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity rating on the 0-4 TALD scale.
///
/// 0 means "not present"; absence from a sparse sheet and an explicit 0
/// are equivalent everywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// "Not present".
    pub const NONE: Severity = Severity(0);
    pub const MAX: u8 = 4;

    /// Create a severity, rejecting values outside 0..=4.
    pub fn new(raw: u8) -> Result<Self, TaldlabError> {
        if raw <= Self::MAX {
            Ok(Self(raw))
        } else {
            Err(TaldlabError::SeverityOutOfRange(raw))
        }
    }

    /// Get the raw level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether this level counts as a positive finding (severity > 0).
    pub fn is_present(self) -> bool {
        self.0 > 0
    }

    /// Absolute difference between two severities.
    pub fn delta(self, other: Severity) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for Severity {
    type Error = TaldlabError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        severity.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagnostic performance score on the 0-100 scale.
///
/// Values are clamped to the range on construction, deserialization
/// included; fractional penalty arithmetic is truncated toward zero,
/// matching the original scoring behavior (a 2.5-point severity penalty
/// yields 97, not 98).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(100);
    pub const MIN: Score = Score(0);

    /// Create a score from integer points, clamping to [0, 100].
    pub fn new(points: i32) -> Self {
        Self(points.clamp(0, 100) as u8)
    }

    /// Create a score from fractional points, clamping then truncating.
    pub fn from_points(points: f64) -> Self {
        Self(points.clamp(0.0, 100.0) as u8)
    }

    /// Get the raw score value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the maximum score.
    pub fn is_perfect(self) -> bool {
        self.0 == 100
    }

    /// Whether the score reaches a pass threshold (default use: 60).
    pub fn is_passing(self, threshold: u8) -> bool {
        self.0 >= threshold
    }

    /// Qualitative band used for display.
    pub fn performance_level(self) -> PerformanceLevel {
        match self.0 {
            90..=100 => PerformanceLevel::Excellent,
            75..=89 => PerformanceLevel::Good,
            60..=74 => PerformanceLevel::Sufficient,
            _ => PerformanceLevel::Insufficient,
        }
    }
}

impl From<u8> for Score {
    fn from(raw: u8) -> Self {
        Self(raw.min(100))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualitative performance band derived from a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Sufficient,
    Insufficient,
}

impl std::fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PerformanceLevel::Excellent => "excellent",
            PerformanceLevel::Good => "good",
            PerformanceLevel::Sufficient => "sufficient",
            PerformanceLevel::Insufficient => "insufficient",
        };
        f.write_str(label)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn score_always_in_bounds(points in -1000i32..1000) {
            let score = Score::new(points);
            prop_assert!(score.value() <= 100);
        }

        #[test]
        fn score_from_points_always_in_bounds(points in -1000.0..1000.0f64) {
            let score = Score::from_points(points);
            prop_assert!(score.value() <= 100);
        }

        #[test]
        fn severity_construction_matches_range(raw in 0u8..=255) {
            let result = Severity::new(raw);
            prop_assert_eq!(result.is_ok(), raw <= 4);
        }

        #[test]
        fn item_id_construction_matches_range(raw in 0u8..=255) {
            let result = ItemId::new(raw);
            prop_assert_eq!(result.is_ok(), (1..=30).contains(&raw));
        }
    }
}
