//! Textual link extraction. Deliberately regex-based, not a Markdown
//! parse: nested brackets and links inside code fences are not specially
//! handled, and stray matches are tolerated downstream.

use regex::Regex;

/// Matches `](./CIP-0001/)`-style document references in the corpus index.
const INDEX_REFERENCE_PATTERN: &str = r"\]\(\./(CIP-[0-9]+)/\)";

/// Markdown link whose target ends in an allowlisted binary extension.
/// The trailing-extension allowlist keeps CIP-to-CIP document links out
/// of the mirror path.
const RESOURCE_LINK_PATTERN: &str = r"\]\(([^()\s]+\.(?:png|jpg|jpeg|json))\)";

/// Scans the index once and returns the document identifier set,
/// duplicates collapsed, first-seen order kept.
pub fn document_identifiers(index: &str) -> Vec<String> {
    let pattern = Regex::new(INDEX_REFERENCE_PATTERN).unwrap();
    let mut identifiers: Vec<String> = Vec::new();
    for capture in pattern.captures_iter(index) {
        let identifier = capture[1].to_string();
        if !identifiers.contains(&identifier) {
            identifiers.push(identifier);
        }
    }
    identifiers
}

/// Returns the ordered sequence (with duplicates) of local resource link
/// targets in a document body. Absolute `http(s)://` targets are not
/// mirror candidates and are excluded here.
pub fn resource_links(content: &str) -> Vec<String> {
    let pattern = Regex::new(RESOURCE_LINK_PATTERN).unwrap();
    pattern
        .captures_iter(content)
        .map(|capture| capture[1].to_string())
        .filter(|target| !target.contains("http://") && !target.contains("https://"))
        .collect()
}
