use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default arXiv host. Listing and PDF URLs are built from this.
pub const DEFAULT_BASE_URL: &str = "https://arxiv.org";

/// Identifying header sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 arxiv-harvest/0.1";

/// arXiv shows 50 entries per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so a bare `arxiv-harvest crawl` works without a
/// .env file. The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    /// Timeout for listing page fetches
    pub listing_timeout: Duration,
    /// Timeout for PDF fetches, longer than the listing one
    pub download_timeout: Duration,
    pub page_size: usize,
    /// Fixed pause between successive outbound requests
    pub request_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(60),
            page_size: DEFAULT_PAGE_SIZE,
            request_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults. A variable that is set but
    /// does not parse is an error naming the variable.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let page_size = parse_var("ARXIV_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            anyhow::bail!("ARXIV_PAGE_SIZE must be at least 1");
        }

        let delay_secs: Option<f64> = parse_var("ARXIV_DELAY_SECS")?;

        Ok(Self {
            base_url: env::var("ARXIV_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            user_agent: env::var("ARXIV_USER_AGENT").unwrap_or(defaults.user_agent),
            listing_timeout: parse_var("ARXIV_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.listing_timeout),
            download_timeout: parse_var("ARXIV_DOWNLOAD_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.download_timeout),
            page_size,
            request_delay: match delay_secs {
                Some(secs) => delay_from_secs(secs)?,
                None => defaults.request_delay,
            },
        })
    }

    /// Replace the request delay with a value given on the command line.
    pub fn with_delay_secs(mut self, secs: f64) -> Result<Self> {
        self.request_delay = delay_from_secs(secs)?;
        Ok(self)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}

fn delay_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("request delay must be a non-negative number of seconds, got {secs}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_listing_layout() {
        let config = Config::default();
        assert_eq!(config.page_size, 50);
        assert!(config.download_timeout > config.listing_timeout);
        assert_eq!(config.base_url, "https://arxiv.org");
    }

    #[test]
    fn test_with_delay_secs_rejects_negative() {
        assert!(Config::default().with_delay_secs(-1.0).is_err());
        let config = Config::default().with_delay_secs(0.25).unwrap();
        assert_eq!(config.request_delay, Duration::from_millis(250));
    }
}
