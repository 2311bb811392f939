// End-to-end pipeline tests against a mock fetcher and a scratch
// output tree.

use serial_test::serial;
use tempfile::tempdir;

use cip_sync_core::config::SyncConfig;
use cip_sync_core::fetch::MockFetcher;
use cip_sync_core::synchronise::{synchronise, SyncError};

const INDEX_URL: &str =
    "https://raw.githubusercontent.com/cardano-foundation/CIPs/master/README.md";

fn test_config(root: &std::path::Path) -> SyncConfig {
    SyncConfig {
        docs_dir: root.join("docs"),
        static_dir: root.join("static"),
        ..SyncConfig::default()
    }
}

fn document_body(number: &str, title: &str) -> String {
    format!(
        "---\nCIP: {number}\nTitle: {title}\nStatus: Active\nType: Process\nCreated: 2020-01-01\n---\n# Abstract\nBody of {title}.\n"
    )
}

#[tokio::test]
#[serial]
async fn two_distinct_references_yield_two_output_files() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    // The duplicate CIP-0001 reference must collapse: each document body
    // is fetched exactly once.
    let index = "\
| 1 | [CIP-0001](./CIP-0001/) |
| 2 | [CIP-0002](./CIP-0002/) |
| again | [CIP-0001](./CIP-0001/) |
";

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url == INDEX_URL)
        .times(1)
        .returning(move |_| Ok(index.to_string()));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0001/README.md"))
        .times(1)
        .returning(|_| Ok(document_body("1", "First")));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0002/README.md"))
        .times(1)
        .returning(|_| Ok(document_body("2", "Second")));

    let report = synchronise(&config, &fetcher)
        .await
        .expect("synchronise should succeed");

    assert_eq!(report.documents.len(), 2, "one report entry per document");

    for identifier in ["CIP-0001", "CIP-0002"] {
        let path = config.docs_dir.join(format!("{identifier}.md"));
        let written = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("{identifier}.md should exist"));
        assert!(!written.is_empty());
        assert!(
            written.starts_with("---"),
            "{identifier}.md should begin with the front-matter fence"
        );
        assert!(written.contains("## CIP Information"));
    }

    let first = std::fs::read_to_string(config.docs_dir.join("CIP-0001.md")).unwrap();
    assert!(first.contains("sidebar_label: (1) First"));
    assert!(first.contains("has the status: [Active](CIP-0001#cip-workflow)"));
}

#[tokio::test]
#[serial]
async fn a_failed_document_is_skipped_and_the_rest_are_written() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    let index = "[CIP-0001](./CIP-0001/) [CIP-0002](./CIP-0002/)";

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url == INDEX_URL)
        .times(1)
        .returning(move |_| Ok(index.to_string()));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0001/README.md"))
        .times(1)
        .returning(|_| Err("404 not found".into()));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0002/README.md"))
        .times(1)
        .returning(|_| Ok(document_body("2", "Second")));

    let report = synchronise(&config, &fetcher)
        .await
        .expect("the run itself should still succeed");

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].identifier, "CIP-0002");
    assert!(!config.docs_dir.join("CIP-0001.md").exists());
    assert!(config.docs_dir.join("CIP-0002.md").exists());
}

#[tokio::test]
#[serial]
async fn an_index_fetch_failure_is_fatal() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url == INDEX_URL)
        .times(1)
        .returning(|_| Err("connection refused".into()));

    let result = synchronise(&config, &fetcher).await;
    assert!(matches!(result, Err(SyncError::IndexFetch(_))));
}

#[tokio::test]
#[serial]
async fn the_docs_dir_is_rebuilt_from_scratch() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    // A stale file from a previous run must not survive the rebuild.
    std::fs::create_dir_all(&config.docs_dir).unwrap();
    std::fs::write(config.docs_dir.join("CIP-9999.md"), "stale").unwrap();

    let index = "[CIP-0001](./CIP-0001/)";

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url == INDEX_URL)
        .times(1)
        .returning(move |_| Ok(index.to_string()));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0001/README.md"))
        .times(1)
        .returning(|_| Ok(document_body("1", "First")));

    synchronise(&config, &fetcher)
        .await
        .expect("synchronise should succeed");

    assert!(!config.docs_dir.join("CIP-9999.md").exists());
    assert!(config.docs_dir.join("CIP-0001.md").exists());
}

#[tokio::test]
#[serial]
async fn a_failed_resource_does_not_block_its_document() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    let index = "[CIP-0001](./CIP-0001/)";
    let body = "---\nCIP: 1\nTitle: First\nStatus: Active\nType: Process\nCreated: 2020-01-01\n---\n![gone](./img/gone.png)\n# Abstract\nText.\n";

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url == INDEX_URL)
        .times(1)
        .returning(move |_| Ok(index.to_string()));
    fetcher
        .expect_fetch_text()
        .withf(|url: &str| url.ends_with("/CIP-0001/README.md"))
        .times(1)
        .returning(move |_| Ok(body.to_string()));
    fetcher
        .expect_fetch_bytes()
        .withf(|url: &str| url.ends_with("/CIP-0001/img/gone.png"))
        .times(1)
        .returning(|_| Err("410 gone".into()));

    let report = synchronise(&config, &fetcher)
        .await
        .expect("synchronise should succeed");

    assert_eq!(report.documents.len(), 1);
    let written = std::fs::read_to_string(config.docs_dir.join("CIP-0001.md")).unwrap();
    assert!(written.starts_with("---"));
    // The unmirrored link was absolutized by normalisation instead.
    assert!(written.contains(
        "](https://raw.githubusercontent.com/cardano-foundation/CIPs/master/CIP-0001/img/gone.png)"
    ));
}
