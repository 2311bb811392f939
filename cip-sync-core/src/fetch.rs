//! # fetch: the remote-content collaborator
//!
//! The pipeline never talks HTTP directly; it goes through the
//! [`Fetcher`] trait, which retrieves a URL as text or as raw bytes.
//! Failure surfaces as a boxed transport error and carries no retry
//! policy of its own.
//!
//! The trait is annotated for `mockall`, so every pipeline test can run
//! against a deterministic `MockFetcher` instead of the network.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

/// Transport error for fetch operations (simple boxed error).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Retrieves remote corpus content. Implemented by [`HttpFetcher`] in
/// production and by `MockFetcher` in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL and decode the body as UTF-8 text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch a URL as raw bytes (images, JSON blobs, etc.).
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain reqwest-backed fetcher; one shared client per instance.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching text");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url = %url, "Fetching bytes");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
