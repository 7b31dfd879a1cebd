//! HTTP transport for nps.gov pages.

use std::future::Future;

use super::error::NpsError;

/// Default base URL for the site directory.
const DEFAULT_BASE_URL: &str = "https://www.nps.gov";

/// Configuration for the page client.
#[derive(Debug, Clone)]
pub struct NpsConfig {
    /// Base URL relative links are resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NpsConfig {
    /// Create a config with the production base URL.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NpsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability to fetch one page body by URL.
///
/// This abstraction lets the cache-first resolvers be tested with canned
/// pages instead of live HTTP.
pub trait PageSource {
    /// Fetch the page at `url` and return its body.
    fn page(&self, url: &str) -> impl Future<Output = Result<String, NpsError>>;
}

/// Client for nps.gov page fetches.
#[derive(Debug, Clone)]
pub struct NpsClient {
    http: reqwest::Client,
}

impl NpsClient {
    /// Create a new client with the configured timeout.
    pub fn new(config: &NpsConfig) -> Result<Self, NpsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl PageSource for NpsClient {
    async fn page(&self, url: &str) -> Result<String, NpsError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(NpsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NpsConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = NpsConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let config = NpsConfig::new();
        assert!(NpsClient::new(&config).is_ok());
    }
}
