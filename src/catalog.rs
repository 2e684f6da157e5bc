//! Static reference data: the 30-item TALD disorder catalog.
//!
//! The manual defines exactly 30 thought-and-language phenomena, each with
//! a 5-level severity rubric. The default catalog is embedded in the
//! binary; `Catalog::from_path` loads an alternative file with the same
//! validation.

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::TaldlabError;
use crate::model::scale::{ItemId, Severity};

const BUILTIN_JSON: &str = include_str!("../data/tald_items.json");

static BUILTIN: Lazy<Catalog> =
    Lazy::new(|| Catalog::from_json(BUILTIN_JSON).expect("embedded catalog is valid"));

/// How a simulated patient is instructed to reveal a disorder. Has no
/// effect on scoring; the distinction matters to the external patient
/// simulator and to trainees studying the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Rated from the examiner's observation of speech and behavior.
    Observable,
    /// Rated from the patient's own report of inner experience.
    SelfReported,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Observable => f.write_str("observable"),
            ItemKind::SelfReported => f.write_str("self-reported"),
        }
    }
}

/// One catalogued disorder with its severity rubric.
///
/// The rubric is a fixed-size array indexed by severity level, so "all
/// five levels 0..=4 present" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisorderDefinition {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    pub description: String,
    pub rubric: [String; 5],
}

impl DisorderDefinition {
    /// Descriptive text for a severity level.
    pub fn rubric_text(&self, level: Severity) -> &str {
        &self.rubric[level.get() as usize]
    }

    /// "7. Verbigeration (observable)" style display name.
    pub fn display_name(&self) -> String {
        format!("{}. {} ({})", self.id, self.title, self.kind)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<DisorderDefinition>,
}

/// The validated catalog: exactly 30 definitions, ids 1..=30, sorted.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<DisorderDefinition>,
}

impl Catalog {
    /// Number of items the manual defines.
    pub const SIZE: usize = 30;

    /// The catalog embedded in the binary.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, TaldlabError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_items(file.items)
    }

    /// Load and validate a catalog from an alternative file.
    pub fn from_path(path: &Path) -> Result<Self, TaldlabError> {
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded catalog file {}", path.display());
        Self::from_json(&json)
    }

    fn from_items(mut items: Vec<DisorderDefinition>) -> Result<Self, TaldlabError> {
        if items.len() != Self::SIZE {
            return Err(TaldlabError::CatalogSize(items.len()));
        }
        let mut seen = BTreeSet::new();
        let mut duplicated = Vec::new();
        for item in &items {
            if !seen.insert(item.id) {
                duplicated.push(item.id.get());
            }
        }
        if !duplicated.is_empty() {
            return Err(TaldlabError::CatalogDuplicateIds(duplicated));
        }
        // 30 distinct ids in a 30-value id space: the set is complete.
        items.sort_by_key(|item| item.id);
        Ok(Self { items })
    }

    /// Definition for an id. Total: every valid `ItemId` has an entry.
    pub fn get(&self, id: ItemId) -> &DisorderDefinition {
        &self.items[(id.get() - 1) as usize]
    }

    /// All definitions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &DisorderDefinition> {
        self.items.iter()
    }

    /// Definitions of one kind, in ascending id order.
    pub fn of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &DisorderDefinition> {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn builtin_catalog_loads_thirty_items() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.iter().count(), Catalog::SIZE);
    }

    #[test]
    fn builtin_ids_are_ascending_and_complete() {
        let ids: Vec<u8> = Catalog::builtin().iter().map(|i| i.id.get()).collect();
        let expected: Vec<u8> = (1..=30).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn get_is_total_over_item_ids() {
        let catalog = Catalog::builtin();
        for item_id in ItemId::all() {
            assert_eq!(catalog.get(item_id).id, item_id);
        }
    }

    #[test]
    fn rubric_covers_all_severity_levels() {
        let catalog = Catalog::builtin();
        for item in catalog.iter() {
            for level in 0..=Severity::MAX {
                let severity = Severity::new(level).unwrap();
                assert!(!item.rubric_text(severity).is_empty());
            }
        }
    }

    #[test]
    fn kinds_partition_the_catalog() {
        let catalog = Catalog::builtin();
        let observable = catalog.of_kind(ItemKind::Observable).count();
        let self_reported = catalog.of_kind(ItemKind::SelfReported).count();
        assert_eq!(observable + self_reported, Catalog::SIZE);
        assert!(observable > 0 && self_reported > 0);
    }

    #[test]
    fn wrong_item_count_is_rejected() {
        let catalog = Catalog::builtin();
        let mut items: Vec<DisorderDefinition> = catalog.iter().cloned().collect();
        items.pop();
        let err = Catalog::from_items(items).unwrap_err();
        assert!(matches!(err, TaldlabError::CatalogSize(29)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let catalog = Catalog::builtin();
        let mut items: Vec<DisorderDefinition> = catalog.iter().cloned().collect();
        items[1].id = id(1);
        let err = Catalog::from_items(items).unwrap_err();
        assert!(matches!(err, TaldlabError::CatalogDuplicateIds(ref d) if d == &vec![1]));
    }

    #[test]
    fn display_name_includes_id_title_and_kind() {
        let item = Catalog::builtin().get(id(7));
        assert_eq!(item.display_name(), "7. Verbigeration (observable)");
    }
}
