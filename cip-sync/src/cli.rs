/// This module implements the CLI interface for cip-sync: command
/// parsing, argument validation, and the async entrypoint.
///
/// All pipeline logic (extraction, mirroring, normalisation, metadata)
/// lives in the `cip-sync-core` crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: run the installed `cip-sync` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// ## Extending
/// When adding subcommands, update [`Commands`] below and keep all
/// non-trivial logic inside `cip-sync-core`.
use crate::load_config::load_config;
use anyhow::Result;
use cip_sync_core::config::SyncConfig;
use cip_sync_core::fetch::HttpFetcher;
use cip_sync_core::synchronise::synchronise;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for cip-sync: mirror the CIP corpus into the documentation tree.
#[derive(Parser)]
#[clap(
    name = "cip-sync",
    version,
    about = "Mirror the Cardano Improvement Proposal corpus into the local documentation tree"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the generated docs tree from the remote corpus
    Sync {
        /// Optional YAML file overriding the built-in corpus locations
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync { config } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => SyncConfig::default(),
            };
            config.trace_loaded();
            tracing::info!(command = "sync", "Starting corpus mirror");

            let fetcher = HttpFetcher::new();
            match synchronise(&config, &fetcher).await {
                Ok(report) => {
                    tracing::info!(
                        command = "sync",
                        documents = report.documents.len(),
                        "Corpus mirror complete"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = ?e, "Corpus mirror failed");
                    Err(anyhow::anyhow!("synchronise failed: {e:?}"))
                }
            }
        }
    }
}
