//! Cache-first resolvers for the site directory.
//!
//! Every resolver consults the [`CacheStore`] before touching the network
//! and writes what it fetched back under the same key. The region
//! directory is the one exception: it is rebuilt on every run.

use serde_json::Value;
use tracing::debug;

use crate::cache::CacheStore;
use crate::domain::{RegionDirectory, Site};

use super::client::{NpsConfig, PageSource};
use super::error::NpsError;
use super::parse;

/// Cache-first access to the region directory, listings, and site records.
pub struct SiteIndex<S> {
    source: S,
    base_url: String,
    index_url: String,
}

impl<S: PageSource> SiteIndex<S> {
    /// Create an index over the given page source.
    ///
    /// Relative links on index and listing pages resolve against the
    /// config's base URL; the directory itself is fetched from
    /// `{base_url}/index.htm`.
    pub fn new(source: S, config: &NpsConfig) -> Self {
        let index_url = format!("{}/index.htm", config.base_url);
        Self {
            source,
            base_url: config.base_url.clone(),
            index_url,
        }
    }

    /// Build the region directory from the index page.
    ///
    /// Deliberately uncached: refetched once per run, never persisted.
    pub async fn region_map(&self) -> Result<RegionDirectory, NpsError> {
        let html = self.source.page(&self.index_url).await?;
        let regions = parse::region_map(&html, &self.base_url, &self.index_url)?;
        Ok(RegionDirectory::new(regions))
    }

    /// Site-detail URLs for a region, in listing order.
    ///
    /// A hit returns the stored sequence as-is; there is no revalidation.
    pub async fn listing(
        &self,
        cache: &mut CacheStore,
        region_url: &str,
    ) -> Result<Vec<String>, NpsError> {
        if let Some(stored) = cache.lookup(region_url) {
            debug!(key = %region_url, "listing cache hit");
            return decode(region_url, stored);
        }

        debug!(key = %region_url, "listing cache miss, fetching");
        let html = self.source.page(region_url).await?;
        let urls = parse::listing_urls(&html, &self.base_url);

        cache.put(region_url, Value::from(urls.clone()));
        Ok(urls)
    }

    /// One site record.
    ///
    /// A hit reconstructs the record from the five stored fields without
    /// refetching or checking staleness. Either way the record is written
    /// back under `site_url`; on a hit that re-write is a no-op.
    pub async fn site(&self, cache: &mut CacheStore, site_url: &str) -> Result<Site, NpsError> {
        let site = match cache.lookup(site_url) {
            Some(stored) => {
                debug!(key = %site_url, "site cache hit");
                decode(site_url, stored)?
            }
            None => {
                debug!(key = %site_url, "site cache miss, fetching");
                let html = self.source.page(site_url).await?;
                parse::site_detail(&html, site_url)?
            }
        };

        cache.put(site_url, encode(site_url, &site)?);
        Ok(site)
    }

    /// All site records for a region, resolving each URL in listing order.
    pub async fn sites_for_region(
        &self,
        cache: &mut CacheStore,
        region_url: &str,
    ) -> Result<Vec<Site>, NpsError> {
        let urls = self.listing(cache, region_url).await?;

        let mut sites = Vec::with_capacity(urls.len());
        for url in &urls {
            sites.push(self.site(cache, url).await?);
        }

        Ok(sites)
    }
}

/// Decode a cached value, mapping shape mismatches to a cache error.
fn decode<T: serde::de::DeserializeOwned>(key: &str, value: &Value) -> Result<T, NpsError> {
    serde_json::from_value(value.clone()).map_err(|e| NpsError::Cache {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn encode(key: &str, site: &Site) -> Result<Value, NpsError> {
    serde_json::to_value(site).map_err(|e| NpsError::Cache {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;
    use tempfile::tempdir;

    use crate::cache::CacheConfig;

    use super::*;

    const BASE: &str = "https://www.nps.gov";
    const MICHIGAN_URL: &str = "https://www.nps.gov/state/mi/index.htm";
    const ISRO_URL: &str = "https://www.nps.gov/isro/index.htm";

    /// Canned page source that counts how often it is asked for a page.
    struct MockPages {
        pages: HashMap<String, String>,
        calls: Mutex<usize>,
    }

    impl MockPages {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                calls: Mutex::new(0),
            }
        }

        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl PageSource for &MockPages {
        async fn page(&self, url: &str) -> Result<String, NpsError> {
            *self.calls.lock().unwrap() += 1;
            self.pages.get(url).cloned().ok_or_else(|| NpsError::Status {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn empty_cache() -> (tempfile::TempDir, CacheStore) {
        let dir = tempdir().unwrap();
        let cache = CacheStore::load(CacheConfig::new(dir.path().join("cache.json")));
        (dir, cache)
    }

    fn index(source: &MockPages) -> SiteIndex<&MockPages> {
        SiteIndex::new(source, &NpsConfig::new())
    }

    const INDEX_PAGE: &str = r#"
        <div class="SearchBar-keywordSearch input-group input-group-lg">
            <a href="/state/mi/index.htm">Michigan</a>
        </div>"#;

    const MICHIGAN_PAGE: &str = r#"<h3><a href="/isro/index.htm">Isle Royale</a></h3>"#;

    const ISRO_PAGE: &str = r#"
        <a class="Hero-title" href="/isro/index.htm">Isle Royale</a>
        <span class="Hero-designation">National Park</span>
        <p class="adr">
            <span itemprop="addressLocality">Houghton</span>,
            <span class="region">MI</span>
            <span class="postal-code">49931</span>
        </p>
        <span class="tel">(906) 482-0984</span>"#;

    #[tokio::test]
    async fn cached_listing_skips_network() {
        let source = MockPages::new();
        let (_dir, mut cache) = empty_cache();
        cache.put(MICHIGAN_URL, json!([ISRO_URL]));

        let urls = index(&source).listing(&mut cache, MICHIGAN_URL).await.unwrap();

        assert_eq!(urls, vec![ISRO_URL.to_string()]);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn listing_miss_fetches_and_stores() {
        let source = MockPages::new().with_page(MICHIGAN_URL, MICHIGAN_PAGE);
        let (_dir, mut cache) = empty_cache();

        let urls = index(&source).listing(&mut cache, MICHIGAN_URL).await.unwrap();

        assert_eq!(urls, vec![ISRO_URL.to_string()]);
        assert_eq!(source.call_count(), 1);
        assert_eq!(cache.lookup(MICHIGAN_URL), Some(&json!([ISRO_URL])));
    }

    #[tokio::test]
    async fn cached_site_is_trusted_over_the_page() {
        let source = MockPages::new().with_page(ISRO_URL, ISRO_PAGE);
        let (_dir, mut cache) = empty_cache();
        cache.put(
            ISRO_URL,
            json!({
                "category": "National Park",
                "name": "Cached Name",
                "address": "Houghton, MI",
                "zipcode": "49931",
                "phone": "(906) 482-0984",
            }),
        );

        let site = index(&source).site(&mut cache, ISRO_URL).await.unwrap();

        assert_eq!(site.name, "Cached Name");
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn resolving_twice_is_idempotent() {
        let source = MockPages::new().with_page(ISRO_URL, ISRO_PAGE);
        let (_dir, mut cache) = empty_cache();
        let idx = index(&source);

        let first = idx.site(&mut cache, ISRO_URL).await.unwrap();
        let stored_after_first = cache.lookup(ISRO_URL).cloned();

        let second = idx.site(&mut cache, ISRO_URL).await.unwrap();
        let stored_after_second = cache.lookup(ISRO_URL).cloned();

        assert_eq!(first, second);
        assert_eq!(stored_after_first, stored_after_second);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_cache_entry_is_an_error() {
        let source = MockPages::new();
        let (_dir, mut cache) = empty_cache();
        cache.put(ISRO_URL, json!(42));

        let err = index(&source).site(&mut cache, ISRO_URL).await.unwrap_err();
        assert!(matches!(err, NpsError::Cache { .. }));
    }

    #[tokio::test]
    async fn region_map_is_never_cached() {
        let source = MockPages::new().with_page("https://www.nps.gov/index.htm", INDEX_PAGE);
        let (_dir, mut cache) = empty_cache();
        let idx = index(&source);

        let first = idx.region_map().await.unwrap();
        let second = idx.region_map().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.call_count(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn index_without_dropdown_propagates() {
        let source = MockPages::new().with_page("https://www.nps.gov/index.htm", "<html></html>");

        let err = index(&source).region_map().await.unwrap_err();
        assert!(matches!(err, NpsError::Parse { .. }));
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let source = MockPages::new();
        let (_dir, mut cache) = empty_cache();

        let err = index(&source)
            .sites_for_region(&mut cache, MICHIGAN_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, NpsError::Status { status: 404, .. }));
    }

    /// Empty cache through directory, listing, site, and a nearby lookup:
    /// afterwards the cache holds exactly the region URL, the site URL,
    /// and the postal code. The directory itself leaves no key behind.
    #[tokio::test]
    async fn end_to_end_scenario() {
        use crate::places::{self, PlacesError, PlacesLookup};

        struct StubPlaces;

        impl PlacesLookup for &StubPlaces {
            async fn radius_search(&self, _origin: &str) -> Result<Value, PlacesError> {
                Ok(json!({
                    "searchResults": [
                        {"name": "Keweenaw Co-op", "fields": {
                            "group_sic_code_name": "Grocery",
                            "address": "1035 Ethel Ave",
                            "city": "Hancock",
                        }},
                    ]
                }))
            }
        }

        let source = MockPages::new()
            .with_page("https://www.nps.gov/index.htm", INDEX_PAGE)
            .with_page(MICHIGAN_URL, MICHIGAN_PAGE)
            .with_page(ISRO_URL, ISRO_PAGE);
        let (_dir, mut cache) = empty_cache();
        let idx = index(&source);

        let directory = idx.region_map().await.unwrap();
        let region_url = directory.get("michigan").unwrap().to_string();
        assert_eq!(region_url, MICHIGAN_URL);

        let urls = idx.listing(&mut cache, &region_url).await.unwrap();
        assert_eq!(urls.len(), 1);

        let site = idx.site(&mut cache, &urls[0]).await.unwrap();
        assert!(!site.name.is_empty());
        assert!(!site.category.is_empty());
        assert_eq!(cache.len(), 2);

        let found = places::nearby(&&StubPlaces, &mut cache, &site).await.unwrap();
        assert_eq!(found.len(), 1);

        assert_eq!(cache.len(), 3);
        assert!(cache.lookup(MICHIGAN_URL).is_some());
        assert!(cache.lookup(ISRO_URL).is_some());
        assert!(cache.lookup("49931").is_some());
    }
}
