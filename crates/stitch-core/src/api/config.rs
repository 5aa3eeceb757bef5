use std::time::Duration;

use crate::error::{MarketError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the marketplace backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `https://api.example.com/api`
    pub base_url: String,
    /// Bearer token injected as the `Authorization` header
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for `base_url` with default timeout.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Configuration` when the URL is empty or does
    /// not use http(s).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(MarketError::Configuration {
                message: "API base URL is empty".to_string(),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MarketError::Configuration {
                message: format!("API base URL must start with http:// or https://: {base_url}"),
            });
        }
        Ok(Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_normalizes_slashes() {
        let config = ApiConfig::new("https://api.example.com/api/").unwrap();
        assert_eq!(config.url("/bids/"), "https://api.example.com/api/bids/");
        assert_eq!(config.url("orders/"), "https://api.example.com/api/orders/");
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        assert!(ApiConfig::new("").is_err());
        assert!(ApiConfig::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = ApiConfig::new("http://localhost:8000")
            .unwrap()
            .with_token(Some("  ".to_string()));
        assert!(config.token.is_none());
    }
}
