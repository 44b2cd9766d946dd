//! Analysis orchestration.
//!
//! Composes the pipeline: consult the rating cache, otherwise send the
//! located text to the remote analyzer under a timeout, parse the response,
//! store a rated result, and return a unified outcome record.
//!
//! ### Failure policy
//! - `Timeout` and `RemoteFailure` surface to the caller unchanged; there is
//!   no retry here.
//! - A response with no extractable rating is a successful outcome with
//!   `rating = None`; it is not cached, so the next request tries again.
//! - Store trouble is logged and otherwise ignored; the pipeline behaves as
//!   if uncached.

pub mod rubric;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use privrank_core::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};
use privrank_core::{AppConfig, CachedRating, Error, RatingStore, ResultCache, STORE_KEY};

use crate::completion::CompletionTransport;
use crate::extract::PageContent;
use crate::parse::parse;

/// Tuning for the orchestrator.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Bound on the remote call, in milliseconds (default: 30s).
    pub timeout_ms: u64,
    /// Time-to-live for cached ratings, in milliseconds (default: 24h).
    pub cache_ttl_ms: i64,
    /// Maximum number of cached hosts (default: 50).
    pub cache_max_entries: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000, cache_ttl_ms: DEFAULT_TTL_MS, cache_max_entries: DEFAULT_MAX_ENTRIES }
    }
}

impl From<&AppConfig> for AnalyzerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            cache_ttl_ms: config.cache_ttl_ms,
            cache_max_entries: config.cache_max_entries,
        }
    }
}

/// Unified result of one analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Raw analyzer response text.
    pub raw_result: String,
    /// Extracted numeric rating, absent when the response had none.
    pub rating: Option<f64>,
    /// Bullet points under "Good:", in order.
    pub good_points: Vec<String>,
    /// Bullet points under "Bad:", in order.
    pub bad_points: Vec<String>,
    /// Whether the analyzed text looked like a dedicated policy page.
    pub is_policy_page: bool,
    /// When the underlying result was produced, epoch milliseconds.
    pub timestamp: i64,
    /// Whether this outcome was served from the cache.
    pub from_cache: bool,
}

/// The analysis orchestrator.
///
/// Holds the remote transport, the in-memory cache, and the store that
/// carries the cache across restarts. One instance serves any number of
/// concurrent requests; the cache sits behind an async mutex and last write
/// wins for same-host races.
pub struct Analyzer {
    transport: Arc<dyn CompletionTransport>,
    store: Arc<dyn RatingStore>,
    cache: Mutex<ResultCache>,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an orchestrator with an empty cache.
    pub fn new(transport: Arc<dyn CompletionTransport>, store: Arc<dyn RatingStore>, config: AnalyzerConfig) -> Self {
        let cache = Mutex::new(ResultCache::new(config.cache_ttl_ms, config.cache_max_entries));
        Self { transport, store, cache, config }
    }

    /// Create an orchestrator and restore the persisted rating mapping.
    ///
    /// A store that fails to load is treated as empty.
    pub async fn with_loaded_cache(
        transport: Arc<dyn CompletionTransport>, store: Arc<dyn RatingStore>, config: AnalyzerConfig,
    ) -> Self {
        let analyzer = Self::new(transport, store, config);
        match analyzer.store.load(STORE_KEY).await {
            Ok(Some(mapping)) => {
                tracing::debug!("restored {} persisted ratings", mapping.len());
                analyzer.cache.lock().await.restore(mapping);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("failed to load persisted ratings: {e}"),
        }
        analyzer
    }

    /// Analyze the page content for `host_key`.
    ///
    /// Serves a live cached entry without any remote call; otherwise races
    /// the remote analyzer against the configured timeout, parses the
    /// response, and caches it when a rating was extracted.
    pub async fn analyze(&self, host_key: &str, content: &PageContent) -> Result<AnalysisOutcome, Error> {
        if host_key.is_empty() {
            return Err(Error::InvalidInput("host key cannot be empty".into()));
        }
        if content.text.is_empty() {
            return Err(Error::NoActiveSource(format!("{host_key}: document has no extractable text")));
        }

        let now = Utc::now().timestamp_millis();
        {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.get(host_key, now) {
                tracing::debug!("cache hit for {host_key}");
                let parsed = parse(&entry.raw_result);
                return Ok(AnalysisOutcome {
                    raw_result: entry.raw_result.clone(),
                    rating: entry.rating,
                    good_points: parsed.good_points,
                    bad_points: parsed.bad_points,
                    is_policy_page: entry.is_policy_page,
                    timestamp: entry.timestamp,
                    from_cache: true,
                });
            }
        }

        tracing::debug!("cache miss for {host_key}; calling remote analyzer");

        let transport = Arc::clone(&self.transport);
        let system = rubric::RUBRIC.to_string();
        let user = rubric::user_prompt(content);
        let call = tokio::spawn(async move { transport.complete(&system, &user).await });

        // First completion wins. When the timer wins, dropping the join
        // handle abandons the call: the task keeps running and whatever it
        // eventually returns is discarded unseen.
        let raw = match tokio::time::timeout(Duration::from_millis(self.config.timeout_ms), call).await {
            Err(_) => {
                tracing::warn!("analysis timed out for {host_key}");
                return Err(Error::Timeout { host: host_key.to_string(), timeout_ms: self.config.timeout_ms });
            }
            Ok(Err(join_err)) => {
                return Err(Error::RemoteFailure(format!("{host_key}: analyzer task failed: {join_err}")));
            }
            Ok(Ok(Err(e))) => return Err(Error::RemoteFailure(format!("{host_key}: {e}"))),
            Ok(Ok(Ok(text))) => text,
        };

        let parsed = parse(&raw);
        let timestamp = Utc::now().timestamp_millis();

        if parsed.rating.is_some() {
            let entry = CachedRating {
                raw_result: raw.clone(),
                rating: parsed.rating,
                is_policy_page: content.is_policy_page,
                timestamp,
            };
            let snapshot = {
                let mut cache = self.cache.lock().await;
                cache.put(host_key, entry);
                cache.snapshot()
            };
            if let Err(e) = self.store.save(STORE_KEY, &snapshot).await {
                tracing::warn!("failed to persist ratings: {e}");
            }
        } else {
            // An unrateable response is returned but never cached.
            tracing::warn!("no numeric rating in analyzer response for {host_key}");
        }

        Ok(AnalysisOutcome {
            raw_result: raw,
            rating: parsed.rating,
            good_points: parsed.good_points,
            bad_points: parsed.bad_points,
            is_policy_page: content.is_policy_page,
            timestamp,
            from_cache: false,
        })
    }

    /// Drop all cached ratings, in memory and in the store.
    pub async fn clear(&self) {
        self.cache.lock().await.clear();
        if let Err(e) = self.store.remove(STORE_KEY).await {
            tracing::warn!("failed to clear persisted ratings: {e}");
        }
    }
}
