//! Cache-first nearby-place resolution.

use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::domain::Site;

use super::client::PlacesLookup;
use super::error::PlacesError;
use super::types::{self, NearbyPlace, RadiusSearchResponse};

/// Nearby places for a site, keyed in the cache by its postal code.
///
/// The raw API response is what gets cached; normalization runs on every
/// retrieval so the stored shape stays exactly what the API sent.
pub async fn nearby(
    lookup: &impl PlacesLookup,
    cache: &mut CacheStore,
    site: &Site,
) -> Result<Vec<NearbyPlace>, PlacesError> {
    let origin = site.zipcode.as_str();
    if origin == Site::UNKNOWN_ZIP {
        // The search proceeds anyway; it just returns poor or no results.
        warn!(site = %site.name, "site has no postal code, searching around the placeholder");
    }

    let raw = match cache.lookup(origin) {
        Some(stored) => {
            debug!(key = %origin, "places cache hit");
            stored.clone()
        }
        None => {
            debug!(key = %origin, "places cache miss, querying");
            let response = lookup.radius_search(origin).await?;
            cache.put(origin, response.clone());
            response
        }
    };

    let response: RadiusSearchResponse =
        serde_json::from_value(raw).map_err(|e| PlacesError::Cache {
            key: origin.to_string(),
            message: e.to_string(),
        })?;

    Ok(types::normalize(&response))
}
