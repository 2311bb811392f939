//! Renderer-compatibility rewrites applied to every document body, plus
//! the per-document patch table for known one-off fixes.
//!
//! The rewrite sequence is fixed and order-sensitive: later steps assume
//! the text shape left by earlier ones. Each step is a pure
//! `text -> text` function; when its pattern is absent the text passes
//! through unchanged, and no step can fail.

use regex::Regex;
use tracing::debug;

use crate::config::SyncConfig;

/// Section headings that would collide with the generated page title if
/// left at top level.
const DEMOTED_HEADINGS: &[&str] = &[
    "Abstract",
    "Motivation",
    "Specification",
    "Rationale",
    "Copyright",
];

/// Context threaded through the rewrite steps.
pub struct RewriteContext<'a> {
    pub identifier: &'a str,
    pub config: &'a SyncConfig,
}

type Rewrite = fn(&str, &RewriteContext) -> String;

const REWRITES: &[(&str, Rewrite)] = &[
    ("strip_html", strip_html),
    ("absolutize_relative_links", absolutize_relative_links),
    ("fix_parent_links", fix_parent_links),
    ("remove_empty_links", remove_empty_links),
    ("strip_escapes", strip_escapes),
    ("demote_section_headings", demote_section_headings),
];

/// Applies the full rewrite sequence once. The orchestrator runs this
/// exactly once per document; heading demotion and the later metadata
/// injection are not re-runnable.
pub fn normalise(content: &str, ctx: &RewriteContext) -> String {
    let mut text = content.to_string();
    for (name, rewrite) in REWRITES {
        text = rewrite(&text, ctx);
        debug!(step = name, identifier = %ctx.identifier, "Applied rewrite");
    }
    text
}

// We expect markdown, therefore strip HTML.
fn strip_html(content: &str, _ctx: &RewriteContext) -> String {
    Regex::new(r"<[^>]+>")
        .unwrap()
        .replace_all(content, "")
        .into_owned()
}

// Rewrite relative links like [Byron](./Byron.md) to absolute links, so
// they keep working after the document is relocated.
fn absolutize_relative_links(content: &str, ctx: &RewriteContext) -> String {
    content.replace(
        "](./",
        &format!("]({}/{}/", ctx.config.raw_base_url, ctx.identifier),
    )
}

// Links pointing up to a sibling document become same-level links; the
// generated docs all live in one flat directory.
fn fix_parent_links(content: &str, _ctx: &RewriteContext) -> String {
    content.replace("](../CIP-", "](./CIP-")
}

// "Yet to come" placeholder links have empty targets.
fn remove_empty_links(content: &str, _ctx: &RewriteContext) -> String {
    content.replace("]()", "]")
}

// Some source documents carry unterminated-string escape artifacts.
fn strip_escapes(content: &str, _ctx: &RewriteContext) -> String {
    content.replace('\\', "")
}

fn demote_section_headings(content: &str, _ctx: &RewriteContext) -> String {
    let mut text = content.to_string();
    for heading in DEMOTED_HEADINGS {
        text = prevent_h1_headline(&text, heading);
    }
    text
}

/// Demotes `# <heading>` to `## <heading>` unless the document already
/// carries the H2 form.
fn prevent_h1_headline(content: &str, heading: &str) -> String {
    let h1 = format!("# {heading}");
    let h2 = format!("## {heading}");
    if content.contains(&h1) && !content.contains(&h2) {
        content.replacen(&h1, &h2, 1)
    } else {
        content.to_string()
    }
}

type Patch = fn(&str) -> String;

/// Known one-off fixes for specific documents, keyed by identifier and
/// kept apart from the generic rewrite sequence.
const DOCUMENT_PATCHES: &[(&str, Patch)] = &[
    ("CIP-0049", strip_empty_preamble_fields),
    ("CIP-0060", link_cddl_to_source),
];

/// Applies any patches registered for this document after the generic
/// rewrites have run.
pub fn apply_patches(identifier: &str, content: String) -> String {
    let mut text = content;
    for (target, patch) in DOCUMENT_PATCHES {
        if *target == identifier {
            debug!(identifier = %identifier, "Applied document patch");
            text = patch(&text);
        }
    }
    text
}

// CIP-0049 carries an empty license/post-history block in its preamble.
fn strip_empty_preamble_fields(content: &str) -> String {
    content.replace(
        "* License: \n* License-Code:\n* Post-History:\n* Requires:\n* Replaces:\n* Superseded-By:\n",
        "",
    )
}

// CIP-0060 references its CDDL schema by bare path; point it at the file
// in the source repository.
fn link_cddl_to_source(content: &str) -> String {
    content.replace(
        "cddl/version-1.cddl",
        "https://github.com/cardano-foundation/CIPs/blob/master/CIP-0060/cddl/version-1.cddl",
    )
}
