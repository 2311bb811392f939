//! Mirrors a document's embedded binary resources into the static tree
//! and relinks the document text to the mirrored copies.

use std::fs;

use futures::future::join_all;
use tracing::{error, info};

use crate::config::SyncConfig;
use crate::extract;
use crate::fetch::Fetcher;

/// Fetches every binary resource referenced by `content` from
/// `<raw_base_url>/<identifier>/<relative-path>`, writes it under
/// `<static_dir>/<identifier>/<relative-path>` (overwriting, creating
/// directories as needed) and rewrites each successfully mirrored link to
/// the static link prefix.
///
/// All resources of one document are fetched concurrently; the returned
/// text is final only once every fetch has settled. A failed resource is
/// logged with its document and path and leaves the original link
/// untouched, so one broken asset never blocks the document.
pub async fn mirror_resources<F>(
    fetcher: &F,
    config: &SyncConfig,
    identifier: &str,
    mut content: String,
) -> String
where
    F: Fetcher + Sync + ?Sized,
{
    // Duplicate links would race on the same target file; mirror each
    // distinct path once and rewrite all its occurrences together.
    let mut targets: Vec<String> = Vec::new();
    for target in extract::resource_links(&content) {
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    let mirrored = join_all(targets.iter().map(|target| async move {
        let relative_path = target.trim_start_matches("./");
        let url = format!("{}/{}/{}", config.raw_base_url, identifier, relative_path);

        let bytes = match fetcher.fetch_bytes(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(
                    identifier = %identifier,
                    relative_path = %relative_path,
                    error = ?e,
                    "Failed to fetch resource"
                );
                return None;
            }
        };

        let target_file = config.static_dir.join(identifier).join(relative_path);
        if let Some(parent) = target_file.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!(
                    identifier = %identifier,
                    relative_path = %relative_path,
                    error = ?e,
                    "Failed to create resource directory"
                );
                return None;
            }
        }
        if let Err(e) = fs::write(&target_file, &bytes) {
            error!(
                identifier = %identifier,
                relative_path = %relative_path,
                error = ?e,
                "Failed to write resource"
            );
            return None;
        }

        info!(
            identifier = %identifier,
            path = %target_file.display(),
            "Mirrored resource"
        );
        Some(target.clone())
    }))
    .await;

    for target in mirrored.into_iter().flatten() {
        let local_link = format!(
            "{}/{}/{}",
            config.static_link_prefix,
            identifier,
            target.trim_start_matches("./")
        );
        content = content.replace(&target, &local_link);
    }

    content
}
