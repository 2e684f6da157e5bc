//! Domain error type for taldlab.
//!
//! Every legality check in the data model fails fast at construction time
//! with one of these variants; the comparison engine itself is total over
//! validly constructed inputs and never returns an error.

use thiserror::Error;

/// Maximum characters accepted for trainee notes.
pub const MAX_NOTES_LEN: usize = 2000;

#[derive(Debug, Error)]
pub enum TaldlabError {
    #[error("item id must be between 1 and 30, got {0}")]
    ItemIdOutOfRange(u8),

    #[error("severity must be between 0 and 4, got {0}")]
    SeverityOutOfRange(u8),

    #[error("item {0} appears more than once in the sheet")]
    DuplicateItem(u8),

    #[error("guided ground truth must list exactly one studied disorder, got {0}")]
    GuidedShape(usize),

    #[error("guided submission must grade the studied disorder {expected}, got item {got}")]
    GuidedTargetMismatch { expected: u8, got: u8 },

    #[error("notes exceed the 2000 character limit ({0} characters)")]
    NotesTooLong(usize),

    #[error("catalog must define exactly 30 items, got {0}")]
    CatalogSize(usize),

    #[error("catalog item ids must cover 1-30 exactly (duplicated: {0:?})")]
    CatalogDuplicateIds(Vec<u8>),

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("failed to read catalog file: {0}")]
    CatalogIo(#[from] std::io::Error),
}
