//! Trainee submission: what the trainee claims at the end of an interview.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::{TaldlabError, MAX_NOTES_LEN};
use crate::model::scale::{ItemId, Severity};

/// The trainee's evaluation sheet, plus optional free-text notes.
///
/// Guided submissions carry one entry for the studied disorder;
/// exploratory submissions carry a sparse sheet over the full catalog.
/// Either way, `severity_of` treats absent ids as severity 0, so an empty
/// exploratory sheet is a valid "no pathology detected" claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraineeSubmission {
    sheet: BTreeMap<ItemId, Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl TraineeSubmission {
    /// Guided-mode submission: one severity for the disorder under study.
    pub fn guided(
        target: ItemId,
        severity: Severity,
        notes: Option<String>,
    ) -> Result<Self, TaldlabError> {
        let mut sheet = BTreeMap::new();
        sheet.insert(target, severity);
        Ok(Self {
            sheet,
            notes: validate_notes(notes)?,
        })
    }

    /// Exploratory-mode submission: a sparse sheet over the catalog. An
    /// empty sheet means "no disorder detected" and is deliberately legal.
    pub fn exploratory(
        sheet: BTreeMap<ItemId, Severity>,
        notes: Option<String>,
    ) -> Result<Self, TaldlabError> {
        Ok(Self {
            sheet,
            notes: validate_notes(notes)?,
        })
    }

    /// The sparse evaluation sheet as submitted.
    pub fn sheet(&self) -> &BTreeMap<ItemId, Severity> {
        &self.sheet
    }

    /// Submitted severity for an id; absence and explicit 0 are equivalent.
    pub fn severity_of(&self, id: ItemId) -> Severity {
        self.sheet.get(&id).copied().unwrap_or(Severity::NONE)
    }

    /// Free-text notes, kept for display and export only.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Trim the notes and reject anything beyond the display bound. Empty or
/// whitespace-only notes collapse to `None`.
fn validate_notes(notes: Option<String>) -> Result<Option<String>, TaldlabError> {
    match notes {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > MAX_NOTES_LEN {
                return Err(TaldlabError::NotesTooLong(trimmed.chars().count()));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}
