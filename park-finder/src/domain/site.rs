//! Protected-area site record.

use serde::{Deserialize, Serialize};

/// One protected-area site, as parsed from its detail page.
///
/// Immutable once constructed. Identity is not tracked: a cache-miss fetch
/// rebuilds the record and overwrites whatever was stored under the same
/// URL. The serialized form (five string fields) is exactly what the cache
/// persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Designation, e.g. "National Park". Some sites have a blank one.
    pub category: String,

    /// Site name, e.g. "Isle Royale".
    pub name: String,

    /// Free-text "city, region" composite, e.g. "Houghton, MI".
    pub address: String,

    /// Postal code, or [`Site::UNKNOWN_ZIP`] when the page omits it.
    pub zipcode: String,

    /// Contact phone, e.g. "(906) 482-0984".
    pub phone: String,
}

impl Site {
    /// Placeholder for pages without a postal-code element (trails and
    /// multi-state sites have no single address block).
    pub const UNKNOWN_ZIP: &'static str = "00000";

    /// Placeholder for pages without a region element.
    pub const NO_REGION: &'static str = "Not listed";

    /// Placeholder for pages without a locality element.
    pub const NO_CITY: &'static str = "No city";

    /// One-line rendering for listings: `Name (Category): Address Zip`.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}
