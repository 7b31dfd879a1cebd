//! Nearby points of interest via the MapQuest radius-search API.
//!
//! The raw JSON response is what gets cached, keyed by postal code;
//! display records are re-derived from it on every retrieval. The API
//! omits keys rather than sending nulls, so normalization maps missing or
//! empty fields to fixed "no <field>" placeholders.

mod client;
mod error;
mod fetch;
mod types;

pub use client::{PlacesClient, PlacesConfig, PlacesLookup};
pub use error::PlacesError;
pub use fetch::nearby;
pub use types::{NearbyPlace, RadiusSearchResponse, ResultFields, SearchResult, normalize};
