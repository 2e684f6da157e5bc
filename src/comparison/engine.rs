//! The comparison engine: pure dispatch, classification, and scoring.
//!
//! `compare` is a total, side-effect-free function over validly
//! constructed inputs. It never mutates its arguments and returns
//! identical results for identical argument pairs, so concurrent callers
//! need no synchronization.

use std::collections::{BTreeMap, BTreeSet};

use crate::comparison::rationale;
use crate::comparison::types::ComparisonResult;
use crate::model::scale::{ItemId, Score, Severity};
use crate::model::{ClinicalConfiguration, Mode, TraineeSubmission};

/// Points deducted per missed disorder. Under-detection is the clinically
/// worse failure mode for a tool that trains sensitivity, so omissions
/// outweigh false alarms.
pub const PENALTY_OMISSION: f64 = 15.0;

/// Points deducted per disorder flagged that was not present.
pub const PENALTY_FALSE_ALARM: f64 = 10.0;

/// Points deducted per full unit of severity-imprecision penalty
/// (0.5 units for an off-by-one grade, 1.0 for an error of 2 or more).
pub const PENALTY_SEVERITY_SCALE: f64 = 5.0;

/// Compare a trainee submission against the ground-truth configuration.
///
/// Dispatches purely on the configuration's mode: guided sessions reduce
/// to a single severity comparison; exploratory sessions run the full
/// set-based classification over the catalog.
pub fn compare(
    submission: &TraineeSubmission,
    configuration: &ClinicalConfiguration,
) -> ComparisonResult {
    match configuration.mode() {
        Mode::Guided => compare_guided(submission, configuration),
        Mode::Exploratory => compare_exploratory(submission, configuration),
    }
}

/// Guided comparison: only the severity of the one studied disorder is
/// under test. The step function deliberately rewards "close enough"
/// judgment uniformly: exact 100, off-by-one 50, anything larger 0.
fn compare_guided(
    submission: &TraineeSubmission,
    configuration: &ClinicalConfiguration,
) -> ComparisonResult {
    // Guided configurations carry exactly one entry by construction; the
    // exploratory path is a graceful fallback, not a reachable branch.
    let Some((target, truth)) = configuration.primary_disorder() else {
        return compare_exploratory(submission, configuration);
    };

    let submitted = submission.severity_of(target);
    let delta = submitted.delta(truth);

    let score = Score::new(match delta {
        0 => 100,
        1 => 50,
        _ => 0,
    });

    let mut true_positives = BTreeSet::new();
    if delta == 0 {
        true_positives.insert(target);
    }

    let mut severity_deltas = BTreeMap::new();
    severity_deltas.insert(target, delta);

    ComparisonResult {
        mode: Mode::Guided,
        true_positives,
        false_positives: BTreeSet::new(),
        false_negatives: BTreeSet::new(),
        severity_deltas,
        score,
        rationale: rationale::guided(target, submitted, truth),
    }
}

/// Exploratory comparison: a set-based confusion matrix over the sparse
/// label space, plus a severity-accuracy signal over the agreed-upon
/// positives.
fn compare_exploratory(
    submission: &TraineeSubmission,
    configuration: &ClinicalConfiguration,
) -> ComparisonResult {
    let truth_positive = present_ids(configuration.active_disorders());
    let submitted_positive = present_ids(submission.sheet());

    let true_positives: BTreeSet<ItemId> = truth_positive
        .intersection(&submitted_positive)
        .copied()
        .collect();
    let false_positives: BTreeSet<ItemId> = submitted_positive
        .difference(&truth_positive)
        .copied()
        .collect();
    let false_negatives: BTreeSet<ItemId> = truth_positive
        .difference(&submitted_positive)
        .copied()
        .collect();

    // Severity accuracy only makes sense where presence was agreed upon.
    let mut severity_deltas = BTreeMap::new();
    let mut grade_penalty = 0.0;
    for id in &true_positives {
        let delta = submission
            .severity_of(*id)
            .delta(configuration.severity_of(*id));
        severity_deltas.insert(*id, delta);
        grade_penalty += match delta {
            0 => 0.0,
            1 => 0.5,
            _ => 1.0,
        };
    }

    let score = exploratory_score(false_negatives.len(), false_positives.len(), grade_penalty);
    let rationale = rationale::exploratory(
        &true_positives,
        &false_positives,
        &false_negatives,
        &severity_deltas,
        configuration,
        submission,
    );

    ComparisonResult {
        mode: Mode::Exploratory,
        true_positives,
        false_positives,
        false_negatives,
        severity_deltas,
        score,
        rationale,
    }
}

/// Penalty-subtraction scoring: start from full credit and deduct per
/// error. A healthy patient matched by an empty sheet keeps the full 100
/// without special-casing.
fn exploratory_score(omissions: usize, false_alarms: usize, grade_penalty: f64) -> Score {
    let mut points = 100.0;
    points -= omissions as f64 * PENALTY_OMISSION;
    points -= false_alarms as f64 * PENALTY_FALSE_ALARM;
    points -= grade_penalty * PENALTY_SEVERITY_SCALE;
    Score::from_points(points)
}

fn present_ids(sheet: &BTreeMap<ItemId, Severity>) -> BTreeSet<ItemId> {
    sheet
        .iter()
        .filter(|(_, severity)| severity.is_present())
        .map(|(id, _)| *id)
        .collect()
}
