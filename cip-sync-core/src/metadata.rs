//! Tag extraction and generated metadata: the front-matter block the
//! documentation renderer needs, and the provenance footer recording
//! where a document came from.

use regex::Regex;

use crate::config::SyncConfig;

/// Rendered in generated text when a document omits one of the
/// recognised tags.
pub const MISSING_TAG_PLACEHOLDER: &str = "unknown";

/// Structured tag values scanned from a document body. A missing tag
/// line yields `None`; generated text falls back to
/// [`MISSING_TAG_PLACEHOLDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTags {
    pub title: Option<String>,
    pub number: Option<String>,
    pub status: Option<String>,
    pub doc_type: Option<String>,
    pub created: Option<String>,
}

/// Scans the normalised body for `<TagName>: <value>` lines. First match
/// wins; no validation of the values is performed.
pub fn extract_tags(content: &str) -> DocTags {
    DocTags {
        title: tag_value(content, "Title"),
        number: tag_value(content, "CIP"),
        status: tag_value(content, "Status"),
        doc_type: tag_value(content, "Type"),
        created: tag_value(content, "Created"),
    }
}

fn tag_value(content: &str, tag_name: &str) -> Option<String> {
    let pattern = Regex::new(&format!("{tag_name}: (.*)")).unwrap();
    pattern
        .captures(content)
        .map(|capture| capture[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Prepends the generated front-matter fence: sidebar label
/// `(<number>) <title>` and the edit-URL pointer. A pre-existing leading
/// `---` delimiter is stripped first so only the generated fence leads
/// the file; the source tag block stays visible in the body.
pub fn inject_front_matter(content: &str, tags: &DocTags) -> String {
    let body = content.strip_prefix("---").unwrap_or(content);

    let number = tags.number.as_deref().unwrap_or(MISSING_TAG_PLACEHOLDER);
    let title = tags.title.as_deref().unwrap_or(MISSING_TAG_PLACEHOLDER);

    format!("--- \nsidebar_label: ({number}) {title}\ncustom_edit_url: null\n--- \n{body}")
}

/// Appends the provenance footer: document type (linked to the format
/// specification), identifier, creation date, status (linked to the
/// workflow), and the back-link to the original source location.
pub fn append_provenance(
    content: String,
    tags: &DocTags,
    identifier: &str,
    config: &SyncConfig,
) -> String {
    let doc_type = tags.doc_type.as_deref().unwrap_or(MISSING_TAG_PLACEHOLDER);
    let created = tags.created.as_deref().unwrap_or(MISSING_TAG_PLACEHOLDER);
    let status = tags.status.as_deref().unwrap_or(MISSING_TAG_PLACEHOLDER);

    format!(
        "{content}\n## CIP Information  \nThis [{doc_type}](CIP-0001#cip-format-and-structure) {identifier} created on **{created}** has the status: [{status}](CIP-0001#cip-workflow).  \nThis page was generated automatically from: [{source_repo}]({repo_base_url}/{identifier}/README.md).",
        source_repo = config.source_repo,
        repo_base_url = config.repo_base_url,
    )
}
