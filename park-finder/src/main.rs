use park_finder::cache::{CacheConfig, CacheStore};
use park_finder::console::Session;
use park_finder::nps::{NpsClient, NpsConfig, SiteIndex};
use park_finder::places::{PlacesClient, PlacesConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Credential for the places API; the site pages need none.
    let api_key = std::env::var("MAPQUEST_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: MAPQUEST_API_KEY not set. Nearby-place lookups will fail.");
        String::new()
    });

    let nps_config = NpsConfig::default();
    let nps_client = NpsClient::new(&nps_config).expect("Failed to create site client");
    let index = SiteIndex::new(nps_client, &nps_config);

    let places_client =
        PlacesClient::new(PlacesConfig::new(api_key)).expect("Failed to create places client");

    let mut cache = CacheStore::load(CacheConfig::default());

    // The directory is rebuilt every run. A failure here means the index
    // page's markup no longer matches; nothing downstream can work.
    let directory = match index.region_map().await {
        Ok(directory) => directory,
        Err(e) => {
            eprintln!("Failed to build the region directory: {e}");
            std::process::exit(1);
        }
    };

    let mut session = Session::new(index, places_client, directory, &mut cache);
    let result = session.run().await;

    // Flush the cache on every exit path, error or not.
    if let Err(e) = cache.save() {
        eprintln!("Warning: failed to save cache to {}: {e}", cache.path().display());
    }

    if let Err(e) = result {
        eprintln!("Session ended with an error: {e}");
        std::process::exit(1);
    }
}
