//! Persistence boundary for the rating cache.
//!
//! The cache itself is in-memory; this module defines the key-value
//! capability used to carry the host → rating mapping across process
//! restarts. The whole mapping is saved under one namespaced key rather than
//! one row per host, matching the flat key-value stores this boundary is
//! meant to sit on.
//!
//! Store trouble is never fatal to an analysis: callers log a warning and
//! continue as if uncached.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{CachedRating, Error};

/// Namespaced key under which the host → rating mapping is persisted.
pub const STORE_KEY: &str = "privrank.ratings.v1";

/// Key-value persistence capability for the rating mapping.
///
/// Implementations serialize the mapping as JSON so any flat string store
/// can back it. [`MemoryStore`] covers tests and ephemeral sessions;
/// [`super::sqlite::SqliteStore`] covers real persistence.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Load the mapping saved under `key`, or `None` if nothing was saved.
    async fn load(&self, key: &str) -> Result<Option<HashMap<String, CachedRating>>, Error>;

    /// Save `mapping` under `key`, replacing any previous value.
    async fn save(&self, key: &str, mapping: &HashMap<String, CachedRating>) -> Result<(), Error>;

    /// Remove whatever is saved under `key`.
    async fn remove(&self, key: &str) -> Result<(), Error>;
}

/// In-memory store for tests and sessions that don't persist.
///
/// Values are held as serialized JSON so the round trip exercises the same
/// encoding as the SQLite backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<HashMap<String, CachedRating>>, Error> {
        let values = self.values.lock().await;
        match values.get(key) {
            Some(json) => {
                let mapping = serde_json::from_str(json).map_err(|e| Error::Store(e.to_string()))?;
                Ok(Some(mapping))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, mapping: &HashMap<String, CachedRating>) -> Result<(), Error> {
        let json = serde_json::to_string(mapping).map_err(|e| Error::Store(e.to_string()))?;
        self.values.lock().await.insert(key.to_string(), json);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
