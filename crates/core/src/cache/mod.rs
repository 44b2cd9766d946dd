//! Bounded, time-aware cache for per-host analysis results.
//!
//! This module provides the in-memory host → rating map consulted before any
//! remote call. It supports:
//!
//! - Lazy TTL expiry (expired entries read as misses and are overwritten in
//!   place by the next write; no background sweep)
//! - A hard entry cap enforced by evicting the oldest entry by timestamp
//! - Snapshot/restore for the persistence boundary in [`store`]

pub mod sqlite;
pub mod store;

pub use crate::Error;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default time-to-live for a cached rating: 24 hours.
pub const DEFAULT_TTL_MS: i64 = 86_400_000;

/// Default maximum number of cached hosts.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Cached analysis result for one host.
///
/// Holds everything needed to reconstruct an outcome without a remote call.
/// The good/bad point lists are not stored; they are re-derived from
/// `raw_result` on a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRating {
    /// Raw analyzer response text.
    pub raw_result: String,
    /// Extracted numeric rating. Entries are only cached when this is set.
    pub rating: Option<f64>,
    /// Whether the analyzed text looked like a dedicated policy page.
    pub is_policy_page: bool,
    /// Insertion time, epoch milliseconds.
    pub timestamp: i64,
}

/// In-memory host → rating cache with TTL and bounded capacity.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, CachedRating>,
    ttl_ms: i64,
    max_entries: usize,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS, DEFAULT_MAX_ENTRIES)
    }
}

impl ResultCache {
    /// Create a cache with the given TTL (milliseconds) and entry cap.
    pub fn new(ttl_ms: i64, max_entries: usize) -> Self {
        Self { entries: HashMap::new(), ttl_ms, max_entries }
    }

    /// Look up the live entry for `key` at time `now_ms`.
    ///
    /// An entry whose age exceeds the TTL reads as a miss. It is not deleted
    /// here; the next `put` for the same key overwrites it.
    pub fn get(&self, key: &str, now_ms: i64) -> Option<&CachedRating> {
        self.entries
            .get(key)
            .filter(|e| now_ms - e.timestamp <= self.ttl_ms)
    }

    /// Insert or overwrite the entry for `key`.
    ///
    /// After insertion the entry with the smallest timestamp is evicted until
    /// the count is back within the cap. Timestamp ties break on the smaller
    /// key so eviction stays deterministic.
    pub fn put(&mut self, key: impl Into<String>, entry: CachedRating) {
        self.entries.insert(key.into(), entry);
        self.evict_over_capacity();
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clone the full mapping for persistence.
    pub fn snapshot(&self) -> HashMap<String, CachedRating> {
        self.entries.clone()
    }

    /// Replace the contents with a previously persisted mapping.
    ///
    /// The cap is enforced on the way in, so a mapping saved under a larger
    /// configured maximum cannot overfill the cache.
    pub fn restore(&mut self, entries: HashMap<String, CachedRating>) {
        self.entries = entries;
        self.evict_over_capacity();
    }

    fn evict_over_capacity(&mut self) {
        while self.entries.len() > self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by(|(ka, a), (kb, b)| a.timestamp.cmp(&b.timestamp).then_with(|| ka.cmp(kb)))
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    tracing::debug!("evicting oldest cache entry for {k}");
                    self.entries.remove(&k);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(raw: &str, score: f64, at: i64) -> CachedRating {
        CachedRating { raw_result: raw.to_string(), rating: Some(score), is_policy_page: true, timestamp: at }
    }

    #[test]
    fn test_get_live_entry() {
        let mut cache = ResultCache::default();
        cache.put("example.com", rating("Rating: 7/10", 7.0, 1_000));

        let entry = cache.get("example.com", 2_000).unwrap();
        assert_eq!(entry.rating, Some(7.0));
    }

    #[test]
    fn test_get_missing_key() {
        let cache = ResultCache::default();
        assert!(cache.get("example.com", 0).is_none());
    }

    #[test]
    fn test_expired_entry_reads_as_miss_without_delete() {
        let mut cache = ResultCache::new(1_000, 50);
        cache.put("example.com", rating("Rating: 7/10", 7.0, 0));

        assert!(cache.get("example.com", 2_000).is_none());
        // Lazy expiry: the slot still counts toward len until overwritten.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_at_exact_ttl_is_live() {
        let mut cache = ResultCache::new(1_000, 50);
        cache.put("example.com", rating("Rating: 7/10", 7.0, 0));
        assert!(cache.get("example.com", 1_000).is_some());
        assert!(cache.get("example.com", 1_001).is_none());
    }

    #[test]
    fn test_put_overwrites_same_key() {
        let mut cache = ResultCache::default();
        cache.put("example.com", rating("Rating: 3/10", 3.0, 1_000));
        cache.put("example.com", rating("Rating: 8/10", 8.0, 2_000));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("example.com", 2_000).unwrap().rating, Some(8.0));
    }

    #[test]
    fn test_eviction_removes_globally_oldest() {
        let mut cache = ResultCache::new(DEFAULT_TTL_MS, 3);
        cache.put("a.com", rating("r", 1.0, 30));
        cache.put("b.com", rating("r", 2.0, 10));
        cache.put("c.com", rating("r", 3.0, 20));
        cache.put("d.com", rating("r", 4.0, 40));

        assert_eq!(cache.len(), 3);
        assert!(cache.get("b.com", 50).is_none());
        assert!(cache.get("a.com", 50).is_some());
        assert!(cache.get("c.com", 50).is_some());
        assert!(cache.get("d.com", 50).is_some());
    }

    #[test]
    fn test_eviction_tie_breaks_on_key() {
        let mut cache = ResultCache::new(DEFAULT_TTL_MS, 2);
        cache.put("b.com", rating("r", 1.0, 10));
        cache.put("a.com", rating("r", 2.0, 10));
        cache.put("c.com", rating("r", 3.0, 20));

        assert!(cache.get("a.com", 30).is_none());
        assert!(cache.get("b.com", 30).is_some());
    }

    #[test]
    fn test_cap_never_exceeded() {
        let mut cache = ResultCache::new(DEFAULT_TTL_MS, 5);
        for i in 0..20 {
            cache.put(format!("host{i}.com"), rating("r", 5.0, i));
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_clear_then_get_is_absent() {
        let mut cache = ResultCache::default();
        cache.put("example.com", rating("Rating: 7/10", 7.0, 1_000));
        cache.clear();

        assert!(cache.get("example.com", 1_000).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_restore_enforces_cap() {
        let mut mapping = HashMap::new();
        for i in 0..10 {
            mapping.insert(format!("host{i}.com"), rating("r", 5.0, i));
        }

        let mut cache = ResultCache::new(DEFAULT_TTL_MS, 4);
        cache.restore(mapping);

        assert_eq!(cache.len(), 4);
        // The four newest timestamps survive.
        for i in 6..10 {
            assert!(cache.get(&format!("host{i}.com"), 10).is_some());
        }
    }
}
