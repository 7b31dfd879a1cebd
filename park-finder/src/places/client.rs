//! MapQuest radius-search client.

use std::future::Future;

use serde_json::Value;

use super::error::PlacesError;

/// Default base URL for the radius-search endpoint.
const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com/search/v2/radius";

/// Most matches a single search asks for.
const MAX_MATCHES: u32 = 10;

/// Search radius, in the API's default distance unit.
const RADIUS: u32 = 10;

/// Configuration for the places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the radius-search endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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

/// Capability to run a radius search around a postal code.
///
/// Returns the raw decoded response so callers can cache it verbatim;
/// normalization happens on every retrieval, cached or fresh. The
/// abstraction lets the nearby resolver be tested with canned responses.
pub trait PlacesLookup {
    /// Search for places within the fixed radius of `origin`.
    fn radius_search(&self, origin: &str) -> impl Future<Output = Result<Value, PlacesError>>;
}

/// Client for the MapQuest radius-search API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    /// Create a new places client.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
        })
    }
}

impl PlacesLookup for PlacesClient {
    async fn radius_search(&self, origin: &str) -> Result<Value, PlacesError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.clone()),
                ("origin", origin.to_string()),
                ("maxMatches", MAX_MATCHES.to_string()),
                ("radius", RADIUS.to_string()),
                ("ambiguities", "ignore".to_string()),
                ("outFormat", "json".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })
    }
}
