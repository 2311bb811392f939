//! High-level pipeline: orchestrates the full corpus mirror run.
//!
//! This module drives fetch → mirror → normalise → inject → persist for
//! every document named by the corpus index:
//!   - Fetches the index and derives the unique document identifier set
//!   - Rebuilds the output docs directory from scratch (never a merge)
//!   - Dispatches all per-document tasks concurrently and awaits them all
//!   - Aggregates a report of what was written and what was skipped
//!
//! # Major Types
//! - [`SyncReport`]: output report listing every document written
//! - [`SyncError`]: the fatal error paths (index fetch, output dir)
//! - [`DocumentError`]: recoverable per-document failures
//!
//! # Error Handling
//! Only the index fetch and the output-directory reset are fatal. A
//! document whose body fetch or file write fails is logged and excluded
//! from the report; its failure never aborts the run. Resource-level
//! failures are handled one level down, in [`crate::mirror`].
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Per-document stages: [`crate::mirror`], [`crate::normalise`],
//!   [`crate::metadata`]

use std::fs;
use std::path::PathBuf;

use futures::future::join_all;
use tracing::{error, info};

use crate::config::SyncConfig;
use crate::extract;
use crate::fetch::{FetchError, Fetcher};
use crate::metadata;
use crate::mirror;
use crate::normalise::{self, RewriteContext};

/// Remote file name holding each document's body, and the corpus index.
const DOCUMENT_FILE: &str = "README.md";

/// Output report: one entry per document actually written.
#[derive(Debug)]
pub struct SyncReport {
    pub documents: Vec<DocumentReport>,
}

#[derive(Debug)]
pub struct DocumentReport {
    pub identifier: String,
    pub output_path: PathBuf,
}

/// Fatal failures: without the index or the output tree there is no run.
#[derive(Debug)]
pub enum SyncError {
    IndexFetch(FetchError),
    OutputDir(std::io::Error),
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        SyncError::OutputDir(e)
    }
}

/// Recoverable per-document failures, aggregated by the orchestrator.
#[derive(Debug)]
pub enum DocumentError {
    Fetch(FetchError),
    Write(std::io::Error),
}

/// Entrypoint: mirror the whole corpus according to config.
pub async fn synchronise<F>(config: &SyncConfig, fetcher: &F) -> Result<SyncReport, SyncError>
where
    F: Fetcher + Sync + ?Sized,
{
    info!("[SYNC] Starting corpus mirror run");

    let index_url = format!("{}/{}", config.raw_base_url, DOCUMENT_FILE);
    let index = match fetcher.fetch_text(&index_url).await {
        Ok(index) => index,
        Err(e) => {
            error!(url = %index_url, error = ?e, "[SYNC][ERROR] Failed to fetch corpus index");
            return Err(SyncError::IndexFetch(e));
        }
    };

    let identifiers = extract::document_identifiers(&index);
    info!(
        documents = identifiers.len(),
        "[SYNC] Derived document identifier set"
    );

    // Full rebuild: the generated tree is never merged with a previous run.
    if config.docs_dir.exists() {
        fs::remove_dir_all(&config.docs_dir)?;
    }
    fs::create_dir_all(&config.docs_dir)?;

    let outcomes = join_all(
        identifiers
            .iter()
            .map(|identifier| process_document(config, fetcher, identifier)),
    )
    .await;

    let mut documents = Vec::new();
    for (identifier, outcome) in identifiers.iter().zip(outcomes) {
        match outcome {
            Ok(report) => documents.push(report),
            Err(e) => {
                error!(identifier = %identifier, error = ?e, "[SYNC][ERROR] Document skipped");
            }
        }
    }

    info!(
        written = documents.len(),
        skipped = identifiers.len() - documents.len(),
        "[SYNC] Corpus mirror run complete"
    );
    Ok(SyncReport { documents })
}

/// Runs the per-document stage chain. The document's text buffer is
/// local to this task; stages hand it forward by value.
async fn process_document<F>(
    config: &SyncConfig,
    fetcher: &F,
    identifier: &str,
) -> Result<DocumentReport, DocumentError>
where
    F: Fetcher + Sync + ?Sized,
{
    let url = format!("{}/{}/{}", config.raw_base_url, identifier, DOCUMENT_FILE);
    info!(identifier = %identifier, "[SYNC] Fetching document");
    let content = fetcher
        .fetch_text(&url)
        .await
        .map_err(DocumentError::Fetch)?;

    let content = mirror::mirror_resources(fetcher, config, identifier, content).await;

    let ctx = RewriteContext { identifier, config };
    let content = normalise::normalise(&content, &ctx);
    let content = normalise::apply_patches(identifier, content);

    let tags = metadata::extract_tags(&content);
    let content = metadata::inject_front_matter(&content, &tags);
    let content = metadata::append_provenance(content, &tags, identifier, config);

    let output_path = config.docs_dir.join(format!("{identifier}.md"));
    fs::write(&output_path, &content).map_err(DocumentError::Write)?;
    info!(
        identifier = %identifier,
        path = %output_path.display(),
        "[SYNC] Document written"
    );

    Ok(DocumentReport {
        identifier: identifier.to_string(),
        output_path,
    })
}
