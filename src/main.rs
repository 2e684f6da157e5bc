use anyhow::Result;
use clap::Parser;
use taldlab::cli::{Cli, Commands};
use taldlab::commands::{catalog, compare};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            config,
            submission,
            format,
            output,
        } => compare::handle_compare(compare::CompareConfig {
            config_path: config,
            submission_path: submission,
            format,
            output_path: output,
        }),
        Commands::Catalog {
            id,
            kind,
            catalog_file,
        } => catalog::handle_catalog(catalog::CatalogConfig {
            id,
            kind: kind.map(Into::into),
            catalog_file,
        }),
    }
}
