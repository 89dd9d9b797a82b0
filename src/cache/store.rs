use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::key::QueryKey;
use crate::config::CacheConfig;
use crate::errors::RequestFailed;
use crate::metrics::registry::{
    QUERY_CACHE_HITS_TOTAL, QUERY_CACHE_INVALIDATIONS_TOTAL, QUERY_CACHE_MISSES_TOTAL,
};

/// Cache entry wrapper with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: DateTime<Utc>,
    stale: bool,
}

/// Shared query cache keyed by [`QueryKey`].
///
/// Values are stored as JSON so one map can hold every resource type.
/// A fetch writes only its own key; no lock is held while fetching.
/// A result whose fetch overlapped an invalidation is stored stale.
#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    // Bumped by every invalidation, matched or not
    epoch: Arc<AtomicU64>,
    stale_after: Duration,
    max_entries: usize,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            epoch: Arc::new(AtomicU64::new(0)),
            stale_after: Duration::seconds(config.stale_after_seconds.min(u64::from(u32::MAX)) as i64),
            max_entries: config.max_entries.max(1),
        }
    }

    /// Fresh cached value for `key`, if any
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().await;
        let cached = entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .and_then(|entry| serde_json::from_value(entry.value.clone()).ok());

        match cached {
            Some(value) => {
                QUERY_CACHE_HITS_TOTAL.inc();
                debug!(key = %key, "Query cache hit");
                Some(value)
            }
            None => {
                QUERY_CACHE_MISSES_TOTAL.inc();
                debug!(key = %key, "Query cache miss");
                None
            }
        }
    }

    /// Store a freshly fetched value
    pub async fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        self.store(key, value, false).await;
    }

    async fn store<T: Serialize>(&self, key: QueryKey, value: &T, stale: bool) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, "Failed to cache query result: {}", e);
                return;
            }
        };

        let mut entries = self.entries.write().await;
        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(key = %oldest, "Evicting oldest query cache entry");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Utc::now(),
                stale,
            },
        );
    }

    /// Serve `key` from the cache, or run `fetcher` and cache its result.
    ///
    /// Failures are returned as-is and leave the cache untouched.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, RequestFailed>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RequestFailed>>,
    {
        if let Some(cached) = self.get(&key).await {
            return Ok(cached);
        }

        let started = self.epoch.load(Ordering::SeqCst);
        let value = fetcher().await?;

        let overlapped = self.epoch.load(Ordering::SeqCst) != started;
        if overlapped {
            debug!(key = %key, "Invalidated while fetching, storing result as stale");
        }
        self.store(key, &value, overlapped).await;
        Ok(value)
    }

    /// Mark every entry under `prefix` stale; returns how many were marked
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let mut marked = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) && !entry.stale {
                entry.stale = true;
                marked += 1;
            }
        }

        QUERY_CACHE_INVALIDATIONS_TOTAL.inc_by(marked as u64);
        debug!(prefix = %prefix, fingerprint = %prefix.fingerprint(), marked, "Invalidated queries");
        marked
    }

    pub async fn is_stale(&self, key: &QueryKey) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).map_or(true, |entry| !self.is_fresh(entry))
    }

    /// Drop every entry; in-flight fetches finish as stale
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        !entry.stale && Utc::now() - entry.fetched_at < self.stale_after
    }
}
