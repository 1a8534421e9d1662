//! parlor: synchronise design tokens from a Parlor project into local
//! stylesheet artifacts and unpacked asset folders.
//!
//! The pipeline takes one fetched project snapshot, gates on its readiness
//! flags, then regenerates the colors/grid/typography stylesheets and pulls
//! down the fonts/images bundles, one independent task per kind.

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod load_config;
pub mod output;
pub mod snapshot;
pub mod stylesheet;
pub mod sync;
pub mod weights;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{HttpParlorApi, ParlorApi};
use crate::load_config::load_config;

/// CLI for parlor: regenerate design-token artifacts for one project.
#[derive(Parser)]
#[clap(
    name = "parlor",
    version,
    about = "Sync design tokens (colors, typography, grid, fonts, images) from a Parlor project"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the project snapshot and regenerate artifacts and assets
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Comma-separated subset of kinds to sync
        /// (colors, grid, typo, fonts, images); defaults to all
        #[clap(long, value_delimiter = ',')]
        only: Vec<sync::SyncKind>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main().
///
/// Per-kind task failures are printed in the report but do not fail the
/// process; only pre-pipeline failures (config, snapshot fetch, readiness)
/// return an error.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync { config, only } => {
            let config = load_config(config)?;
            let api = HttpParlorApi::new(&config);
            let snapshot = api
                .fetch_snapshot()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to fetch project snapshot: {e}"))?;

            let kinds = if only.is_empty() {
                sync::ALL_KINDS.to_vec()
            } else {
                only
            };

            println!("Sync starting...");
            let report = sync::run(&api, &snapshot, &kinds, &config)
                .await
                .map_err(|e| anyhow::anyhow!("Sync aborted: {e}"))?;

            println!("Sync complete.\nReport:");
            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(()) => println!("  {}: ok", outcome.kind),
                    Err(e) => println!("  {}: failed ({e})", outcome.kind),
                }
            }
            Ok(())
        }
    }
}
