//! Region directory: normalized region names to listing URLs.

use std::collections::BTreeMap;

/// Directory of regions (US states and territories), keyed by lower-cased
/// full name, e.g. `"michigan"`.
///
/// Built from the index page once per run and deliberately never cached,
/// unlike listings and site records: the directory rarely changes and has
/// no natural cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDirectory {
    regions: BTreeMap<String, String>,
}

impl RegionDirectory {
    /// Wrap a name-to-URL map.
    pub fn new(regions: BTreeMap<String, String>) -> Self {
        Self { regions }
    }

    /// Normalize user input the same way directory keys are normalized.
    pub fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// Listing URL for a region, by name. Input is normalized first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.regions.get(&Self::normalize(name)).map(String::as_str)
    }

    /// Match a two-letter postal abbreviation against the state code
    /// embedded in each listing URL, returning the full region name.
    pub fn match_abbreviation(&self, input: &str) -> Option<&str> {
        let abbr = Self::normalize(input);
        if abbr.len() != 2 {
            return None;
        }

        self.regions
            .iter()
            .find(|(_, url)| state_code(url) == Some(abbr.as_str()))
            .map(|(name, _)| name.as_str())
    }

    /// Region names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Extract the state code segment from a listing URL.
///
/// Listing URLs have the shape `{base}/state/{code}/index.htm`.
fn state_code(url: &str) -> Option<&str> {
    let rest = url.split("/state/").nth(1)?;
    rest.split('/').next().filter(|code| code.len() == 2)
}
