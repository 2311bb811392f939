use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the corpus lives and where the mirrored tree is written.
///
/// `Default` carries the production constants; the CLI may override
/// individual fields from a YAML file. Omitted fields keep their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Raw content base; `<raw_base_url>/<identifier>/README.md` is a document body.
    pub raw_base_url: String,
    /// Browsable repository base, used for provenance back-links.
    pub repo_base_url: String,
    /// `owner/name` of the source repository.
    pub source_repo: String,
    /// Directory receiving one generated `<identifier>.md` per document.
    pub docs_dir: PathBuf,
    /// Root for mirrored binary resources, keyed by document identifier.
    pub static_dir: PathBuf,
    /// Link prefix rewritten into documents for mirrored resources. The
    /// `../../..` segments escape the generated docs directory.
    pub static_link_prefix: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            raw_base_url: "https://raw.githubusercontent.com/cardano-foundation/CIPs/master"
                .to_string(),
            repo_base_url: "https://github.com/cardano-foundation/CIPs/tree/master".to_string(),
            source_repo: "cardano-foundation/CIPs".to_string(),
            docs_dir: PathBuf::from("./docs/governance/cardano-improvement-proposals"),
            static_dir: PathBuf::from("./static/img/cip"),
            static_link_prefix: "../../../static/img/cip".to_string(),
        }
    }
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            raw_base_url = %self.raw_base_url,
            docs_dir = %self.docs_dir.display(),
            static_dir = %self.static_dir.display(),
            "Loaded SyncConfig"
        );
        debug!(?self, "SyncConfig loaded (full debug)");
    }
}
