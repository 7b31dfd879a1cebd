//! Persistent fetch cache.
//!
//! One JSON object on disk, loaded whole at startup and written back whole
//! at orderly shutdown. Keys are source URLs or postal codes; values are
//! whatever JSON the fetch produced (a site record, a listing array, or a
//! raw places-API response). Entries never expire and are never evicted,
//! so the file grows across runs; repeat lookups trade that disk for zero
//! network traffic.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Default cache file, relative to the working directory.
const DEFAULT_PATH: &str = "park_cache.json";

/// Errors from persisting the cache. Loading never fails.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Could not create the cache file's parent directory
    #[error("failed to create cache directory: {0}")]
    CreateDir(std::io::Error),

    /// Could not serialize the store
    #[error("failed to serialize cache: {0}")]
    Serialize(serde_json::Error),

    /// Could not write the cache file
    #[error("failed to write cache file: {0}")]
    Write(std::io::Error),
}

/// Configuration for the cache store.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
}

impl CacheConfig {
    /// Create a config pointing at the given cache file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

/// In-memory key to JSON-value mapping backed by a single file.
///
/// There is exactly one store per process, passed `&mut` into every
/// resolver. Single-writer, single-reader: no locking.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl CacheStore {
    /// Load the store from disk.
    ///
    /// A missing file, an unreadable file, or contents that fail to parse
    /// as a JSON object all yield an empty store. A corrupt cache costs
    /// refetches, not a startup error.
    pub fn load(config: CacheConfig) -> Self {
        let entries = std::fs::read_to_string(&config.path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        Self {
            path: config.path,
            entries,
        }
    }

    /// Look up a cached value. Absence is expected, not an error.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert a value, unconditionally overwriting any entry for `key`.
    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Write the whole store back to its file, replacing prior contents.
    ///
    /// Creates parent directories if they don't exist. Called once per
    /// exit path; there is no incremental persistence, so an interrupted
    /// run loses every fetch since the last save.
    pub fn save(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(CacheError::CreateDir)?;
        }

        let json = serde_json::to_string(&self.entries).map_err(CacheError::Serialize)?;
        std::fs::write(&self.path, json).map_err(CacheError::Write)?;

        Ok(())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
