// Minimum-interval gate for outbound requests.
//
// arXiv asks crawlers to pace themselves. Every listing fetch and every PDF
// download passes through the same gate, which sleeps until at least
// `interval` has elapsed since the previous request was let through. No
// jitter, no adaptive backoff.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Shared pacing gate. Clones share the same last-request timestamp.
#[derive(Clone)]
pub struct RequestGate {
    inner: Arc<Mutex<RequestGateInner>>,
}

struct RequestGateInner {
    /// Minimum time between requests
    interval: Duration,
    /// When the last request was allowed through
    last_request: Option<Instant>,
}

impl RequestGate {
    /// Create a gate that spaces requests at least `interval` apart.
    /// A zero interval never sleeps.
    pub fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RequestGateInner {
                interval,
                last_request: None,
            })),
        }
    }

    /// Wait until the next request may go out, then record it.
    ///
    /// The first call returns immediately.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(last) = inner.last_request {
            let elapsed = Instant::now().duration_since(last);
            if elapsed < inner.interval {
                tokio::time::sleep(inner.interval - elapsed).await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}
