//! Site source error types.

/// Errors from fetching or parsing nps.gov pages.
#[derive(Debug, thiserror::Error)]
pub enum NpsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// An element the markup contract requires was missing
    #[error("missing {what} in {url}")]
    Parse { what: &'static str, url: String },

    /// A cached value failed to decode
    #[error("cache entry for {key} has unexpected shape: {message}")]
    Cache { key: String, message: String },
}
