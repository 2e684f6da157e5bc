use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::ItemKind;

#[derive(Parser, Debug)]
#[command(name = "taldlab")]
#[command(about = "Scoring engine for TALD-based diagnostic training", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a trainee submission against a ground-truth configuration
    Compare {
        /// Path to the ground-truth configuration JSON
        #[arg(long)]
        config: PathBuf,

        /// Path to the trainee submission JSON
        #[arg(long)]
        submission: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the disorder catalog, or show one item's grading rubric
    Catalog {
        /// Show the full rubric for a single item id (1-30)
        #[arg(long)]
        id: Option<u8>,

        /// Restrict the listing to one kind of item
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Load the catalog from a JSON file instead of the built-in one
        #[arg(long)]
        catalog_file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored report
    Terminal,
    /// Machine-readable JSON report
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Disorders graded from observed speech
    Observable,
    /// Disorders graded from patient self-report
    SelfReported,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Observable => ItemKind::Observable,
            KindArg::SelfReported => ItemKind::SelfReported,
        }
    }
}
