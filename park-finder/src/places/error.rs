//! Places API error types.

/// Errors from the radius-search API.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check MAPQUEST_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to decode the response body
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A cached value failed to decode
    #[error("cache entry for {key} has unexpected shape: {message}")]
    Cache { key: String, message: String },
}
