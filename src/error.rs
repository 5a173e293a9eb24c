// Typed errors for the network-facing pieces of the library.
//
// Application glue (main.rs, persistence) uses anyhow. The crawl loop and the
// downloader need to tell failure kinds apart, so they get concrete enums.

use std::path::PathBuf;

use thiserror::Error;

/// A failed outbound GET. Never retried by the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL the failed request was aimed at.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// A single PDF download that did not complete.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
