//! Deterministic rationale text for comparison results.
//!
//! The rationale is descriptive only: it restates the classification and
//! severity findings in prose, in a fixed block order with items listed in
//! ascending id. It carries no scoring semantics of its own.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Catalog;
use crate::model::scale::{ItemId, Severity};
use crate::model::{ClinicalConfiguration, TraineeSubmission};

/// Bound on rationale length, for downstream rendering.
pub const MAX_RATIONALE_LEN: usize = 3000;

/// Rationale for a guided comparison: one message per delta bucket,
/// naming the direction of error and echoing both severities.
pub fn guided(target: ItemId, submitted: Severity, truth: Severity) -> String {
    let title = &Catalog::builtin().get(target).title;
    let text = match submitted.delta(truth) {
        0 => format!(
            "Excellent. You identified the correct severity for {} ({}/4).",
            title, truth
        ),
        1 => format!(
            "Good approximation. You slightly {} {} (yours: {}, actual: {}).",
            direction(submitted, truth),
            title,
            submitted,
            truth
        ),
        _ => format!(
            "Significant error. You markedly {} the severity of {} \
             (yours: {}, actual: {}). Review the grading criteria.",
            direction(submitted, truth),
            title,
            submitted,
            truth
        ),
    };
    truncated(text)
}

/// Rationale for an exploratory comparison: headline, per-true-positive
/// severity lines, then per-discrepancy lines.
pub fn exploratory(
    true_positives: &BTreeSet<ItemId>,
    false_positives: &BTreeSet<ItemId>,
    false_negatives: &BTreeSet<ItemId>,
    severity_deltas: &BTreeMap<ItemId, u8>,
    configuration: &ClinicalConfiguration,
    submission: &TraineeSubmission,
) -> String {
    let mut blocks = headline(true_positives, false_positives, false_negatives, configuration);

    if !true_positives.is_empty() {
        blocks.push(String::new());
        blocks.push("Severity accuracy:".to_string());
        for id in true_positives {
            let submitted = submission.severity_of(*id);
            let truth = configuration.severity_of(*id);
            // The engine always supplies a delta per true positive; other
            // callers may not, so recompute on a miss instead of indexing.
            let delta = severity_deltas
                .get(id)
                .copied()
                .unwrap_or_else(|| submitted.delta(truth));
            blocks.push(severity_line(*id, submitted, truth, delta));
        }
    }

    if !false_negatives.is_empty() || !false_positives.is_empty() {
        blocks.push(String::new());
        blocks.push("Discrepancies:".to_string());
        for id in false_negatives {
            blocks.push(format!(
                "- {} was present at severity {} but was not flagged.",
                Catalog::builtin().get(*id).title,
                configuration.severity_of(*id)
            ));
        }
        for id in false_positives {
            blocks.push(format!(
                "- {} was absent but was flagged at severity {}.",
                Catalog::builtin().get(*id).title,
                submission.severity_of(*id)
            ));
        }
    }

    truncated(blocks.join("\n"))
}

fn direction(submitted: Severity, truth: Severity) -> &'static str {
    if submitted < truth {
        "underestimated"
    } else {
        "overestimated"
    }
}

/// Headline block. An empty true-positive set is ambiguous on its own:
/// the healthy-patient case must be called out explicitly so the trainee
/// can tell "nothing to find" apart from "found nothing".
fn headline(
    true_positives: &BTreeSet<ItemId>,
    false_positives: &BTreeSet<ItemId>,
    false_negatives: &BTreeSet<ItemId>,
    configuration: &ClinicalConfiguration,
) -> Vec<String> {
    let flawless = false_positives.is_empty() && false_negatives.is_empty();
    if flawless && !true_positives.is_empty() {
        return vec!["Perfect diagnosis: all present disorders were identified.".to_string()];
    }
    if flawless {
        return vec![
            "Perfect diagnosis: you correctly recognized a healthy patient \
             (no disorders present)."
                .to_string(),
        ];
    }

    let mut lines = Vec::new();
    if configuration.is_healthy() {
        lines.push("The simulated patient was healthy: no disorders were present.".to_string());
    }
    if !true_positives.is_empty() {
        lines.push(format!(
            "You correctly identified {} disorder(s).",
            true_positives.len()
        ));
    }
    if !false_negatives.is_empty() {
        lines.push(format!(
            "Omissions: you missed {} disorder(s) present in the clinical picture.",
            false_negatives.len()
        ));
    }
    if !false_positives.is_empty() {
        lines.push(format!(
            "False alarms: you flagged {} disorder(s) that were not present.",
            false_positives.len()
        ));
    }
    lines
}

fn severity_line(id: ItemId, submitted: Severity, truth: Severity, delta: u8) -> String {
    let title = &Catalog::builtin().get(id).title;
    match delta {
        0 => format!("- {}: severity correct ({}/4).", title, submitted),
        1 => format!(
            "- {}: imprecise (yours: {}, actual: {}).",
            title, submitted, truth
        ),
        _ => format!(
            "- {}: wrong (yours: {}, actual: {}).",
            title, submitted, truth
        ),
    }
}

fn truncated(text: String) -> String {
    if text.chars().count() <= MAX_RATIONALE_LEN {
        text
    } else {
        text.chars().take(MAX_RATIONALE_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn id(raw: u8) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn sev(raw: u8) -> Severity {
        Severity::new(raw).unwrap()
    }

    #[test]
    fn guided_exact_message_echoes_truth() {
        let text = guided(id(7), sev(3), sev(3));
        assert!(text.contains("correct severity"));
        assert!(text.contains("Verbigeration"));
        assert!(text.contains("(3/4)"));
    }

    #[test]
    fn guided_off_by_one_names_direction() {
        let over = guided(id(2), sev(2), sev(1));
        assert!(over.contains("slightly overestimated"));
        assert!(over.contains("yours: 2, actual: 1"));

        let under = guided(id(2), sev(1), sev(2));
        assert!(under.contains("slightly underestimated"));
    }

    #[test]
    fn guided_large_miss_is_marked() {
        let text = guided(id(2), sev(0), sev(4));
        assert!(text.contains("markedly underestimated"));
        assert!(text.contains("Review the grading criteria"));
    }

    #[test]
    fn healthy_patient_headline_is_explicit() {
        let configuration = ClinicalConfiguration::exploratory(BTreeMap::new());
        let submission = TraineeSubmission::exploratory(BTreeMap::new(), None).unwrap();
        let empty = BTreeSet::new();
        let text = exploratory(
            &empty,
            &empty,
            &empty,
            &BTreeMap::new(),
            &configuration,
            &submission,
        );
        assert!(text.contains("healthy patient"));
    }

    #[test]
    fn healthy_patient_false_alarm_is_flagged() {
        let configuration = ClinicalConfiguration::exploratory(BTreeMap::new());
        let mut sheet = BTreeMap::new();
        sheet.insert(id(12), sev(2));
        let submission = TraineeSubmission::exploratory(sheet, None).unwrap();
        let empty = BTreeSet::new();
        let fps: BTreeSet<ItemId> = [id(12)].into();
        let text = exploratory(
            &empty,
            &fps,
            &empty,
            &BTreeMap::new(),
            &configuration,
            &submission,
        );
        assert!(text.contains("patient was healthy"));
        assert!(text.contains("was absent but was flagged at severity 2"));
    }

    #[test]
    fn missing_delta_entry_is_recomputed_not_a_panic() {
        let mut active = BTreeMap::new();
        active.insert(id(3), sev(2));
        let configuration = ClinicalConfiguration::exploratory(active);
        let mut sheet = BTreeMap::new();
        sheet.insert(id(3), sev(3));
        let submission = TraineeSubmission::exploratory(sheet, None).unwrap();

        let tps: BTreeSet<ItemId> = [id(3)].into();
        let empty = BTreeSet::new();
        let text = exploratory(
            &tps,
            &empty,
            &empty,
            &BTreeMap::new(),
            &configuration,
            &submission,
        );

        assert!(text.contains("Derailment: imprecise (yours: 3, actual: 2)."));
    }

    #[test]
    fn detail_lines_are_in_ascending_id_order() {
        let mut active = BTreeMap::new();
        active.insert(id(9), sev(4));
        active.insert(id(3), sev(2));
        let configuration = ClinicalConfiguration::exploratory(active);
        let mut sheet = BTreeMap::new();
        sheet.insert(id(9), sev(4));
        sheet.insert(id(3), sev(2));
        let submission = TraineeSubmission::exploratory(sheet, None).unwrap();

        let tps: BTreeSet<ItemId> = [id(3), id(9)].into();
        let mut deltas = BTreeMap::new();
        deltas.insert(id(3), 0);
        deltas.insert(id(9), 0);
        let empty = BTreeSet::new();
        let text = exploratory(&tps, &empty, &empty, &deltas, &configuration, &submission);

        let pos_3 = text.find("Derailment").unwrap();
        let pos_9 = text.find("Pressured Speech").unwrap();
        assert!(pos_3 < pos_9);
    }

    #[test]
    fn rationale_is_bounded() {
        let long: String = "x".repeat(2 * MAX_RATIONALE_LEN);
        assert_eq!(truncated(long).chars().count(), MAX_RATIONALE_LEN);
    }
}
