// HTTP fetcher for arXiv pages and PDFs.
//
// One GET per call, no retries. Pacing between calls is the caller's job
// (see `RequestGate`); this client only applies the identifying User-Agent
// and a per-request timeout.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;

/// Anything that can GET a URL and hand back the body bytes.
///
/// The crawl loop and the downloader are written against this trait so they
/// can be driven by canned pages in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, failing on connection errors, timeouts, and non-2xx status.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed fetcher. Holds one connection pool for the whole run.
pub struct ArxivClient {
    client: reqwest::Client,
}

impl ArxivClient {
    /// Build a client that sends `user_agent` with every request.
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ArxivClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        debug!(url = url, timeout_secs = timeout.as_secs_f64(), "GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}
