//! Radius-search response DTOs and normalization.

use serde::Deserialize;

/// Response from the radius-search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusSearchResponse {
    /// Matches in API order. Omitted entirely when nothing matched.
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
}

/// One match from a radius search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Display name of the place.
    pub name: Option<String>,

    /// Nested detail fields; the API omits the whole block for some hits.
    pub fields: Option<ResultFields>,
}

/// Nested detail fields of a match.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultFields {
    /// Category, e.g. "Restaurant".
    pub group_sic_code_name: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// City.
    pub city: Option<String>,
}

/// Normalized display record for one nearby place.
///
/// Transient: derived from the cached raw response on every retrieval,
/// never stored itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyPlace {
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
}

impl NearbyPlace {
    /// Placeholder for a missing or empty name.
    pub const NO_NAME: &'static str = "no name";

    /// Placeholder for a missing or empty category.
    pub const NO_CATEGORY: &'static str = "no category";

    /// Placeholder for a missing or empty street address.
    pub const NO_ADDRESS: &'static str = "no address";

    /// Placeholder for a missing or empty city.
    pub const NO_CITY: &'static str = "no city";

    /// One-line rendering: `- Name (Category): Address, City`.
    pub fn summary(&self) -> String {
        format!(
            "- {} ({}): {}, {}",
            self.name, self.category, self.address, self.city
        )
    }
}

/// Replace a missing or empty field with its placeholder.
fn field_or(value: Option<&String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => placeholder.to_string(),
    }
}

/// Flatten a response into display records, preserving API order.
pub fn normalize(response: &RadiusSearchResponse) -> Vec<NearbyPlace> {
    response
        .search_results
        .iter()
        .map(|result| {
            let fields = result.fields.as_ref();
            NearbyPlace {
                name: field_or(result.name.as_ref(), NearbyPlace::NO_NAME),
                category: field_or(
                    fields.and_then(|f| f.group_sic_code_name.as_ref()),
                    NearbyPlace::NO_CATEGORY,
                ),
                address: field_or(fields.and_then(|f| f.address.as_ref()), NearbyPlace::NO_ADDRESS),
                city: field_or(fields.and_then(|f| f.city.as_ref()), NearbyPlace::NO_CITY),
            }
        })
        .collect()
}
