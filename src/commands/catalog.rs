//! The `catalog` command: list the built-in disorder catalog or print one
//! item's full grading rubric.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::{Catalog, ItemKind};
use crate::model::scale::{ItemId, Severity};

pub struct CatalogConfig {
    pub id: Option<u8>,
    pub kind: Option<ItemKind>,
    pub catalog_file: Option<PathBuf>,
}

pub fn handle_catalog(config: CatalogConfig) -> Result<()> {
    let loaded;
    let catalog = match &config.catalog_file {
        Some(path) => {
            loaded = Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            &loaded
        }
        None => Catalog::builtin(),
    };

    match config.id {
        Some(raw) => {
            let Ok(id) = ItemId::new(raw) else {
                bail!("item id must be between 1 and 30, got {raw}");
            };
            print_rubric(catalog, id);
        }
        None => print_listing(catalog, config.kind),
    }
    Ok(())
}

fn print_rubric(catalog: &Catalog, id: ItemId) {
    let item = catalog.get(id);
    println!("{}", item.display_name().bold());
    println!("{}", item.description);
    println!();
    for raw in 0..=Severity::MAX {
        // Range is 0..=4 by construction.
        if let Ok(level) = Severity::new(raw) {
            println!("  {}: {}", level, item.rubric_text(level));
        }
    }
}

fn print_listing(catalog: &Catalog, kind: Option<ItemKind>) {
    let items: Vec<_> = match kind {
        Some(kind) => catalog.of_kind(kind).collect(),
        None => catalog.iter().collect(),
    };
    for item in items {
        println!("{}", item.display_name());
    }
}
