//! Ground-truth clinical configuration for a training session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::scale::{ItemId, Severity};

/// Training variant. Immutable for the lifetime of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The trainee knows which disorder is simulated and only grades it.
    Guided,
    /// The trainee must detect and grade disorders across the full catalog.
    Exploratory,
}

/// What is actually true about the simulated patient: a sparse mapping of
/// disorder id to severity, plus the training mode.
///
/// Shape invariants are enforced by the two constructors rather than by a
/// type per mode: guided configurations carry exactly one entry (which may
/// be severity 0, the deliberately asymptomatic case), exploratory ones
/// carry any number of present disorders. Severity-0 entries in an
/// exploratory configuration carry no diagnostic weight and are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClinicalConfiguration {
    mode: Mode,
    active: BTreeMap<ItemId, Severity>,
}

impl ClinicalConfiguration {
    /// Guided-mode ground truth: one studied disorder at a known severity.
    pub fn guided(item: ItemId, severity: Severity) -> Self {
        let mut active = BTreeMap::new();
        active.insert(item, severity);
        Self {
            mode: Mode::Guided,
            active,
        }
    }

    /// Exploratory-mode ground truth: zero entries (healthy patient), one,
    /// or several (comorbidity). Severity-0 entries are equivalent to
    /// absence and are normalized away.
    pub fn exploratory(active: BTreeMap<ItemId, Severity>) -> Self {
        let active = active
            .into_iter()
            .filter(|(_, severity)| severity.is_present())
            .collect();
        Self {
            mode: Mode::Exploratory,
            active,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The sparse ground-truth mapping. Absent ids are severity 0.
    pub fn active_disorders(&self) -> &BTreeMap<ItemId, Severity> {
        &self.active
    }

    /// True severity for an id, treating absence as "not present".
    pub fn severity_of(&self, id: ItemId) -> Severity {
        self.active.get(&id).copied().unwrap_or(Severity::NONE)
    }

    /// The entry with the highest severity. Ties break toward the lowest
    /// id; `None` for an empty mapping.
    pub fn primary_disorder(&self) -> Option<(ItemId, Severity)> {
        self.active
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(id, severity)| (*id, *severity))
    }

    /// Whether the configuration represents an asymptomatic patient.
    pub fn is_healthy(&self) -> bool {
        self.active.values().all(|severity| !severity.is_present())
    }
}
