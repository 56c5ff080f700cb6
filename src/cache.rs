//! In-process TTL cache memoizing catalog read queries.
//!
//! A keyed map with per-entry expiry, checked on read. Single process,
//! read-mostly traffic; there is no size bound or eviction policy beyond
//! expiry, and none is needed at this catalog's scale.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// String-keyed TTL store. Values are stored as serialized JSON so the same
/// cache can hold every query's result shape.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
}

impl ResponseCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Returns the stored string unless the entry has expired, in which case
    /// the entry is evicted and `None` is returned.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        {
            let store = self.store.read().unwrap();
            match store.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.store.write().unwrap().remove(key);
        None
    }

    pub fn set_raw(&self, key: &str, value: String, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.store
            .write()
            .unwrap()
            .insert(key.to_string(), CacheEntry::new(value, ttl));
    }

    /// Typed get: a stored value that no longer deserializes (shape changed
    /// across a deploy) is treated as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "dropping undeserializable cache entry: {e}");
                self.invalidate(key);
                None
            }
        }
    }

    pub fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw, ttl);
        Ok(())
    }

    pub fn invalidate(&self, key: &str) {
        self.store.write().unwrap().remove(key);
    }

    /// Drops every entry whose key starts with `prefix`. Admin catalog writes
    /// use this to flush all memoized catalog reads at once.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.store
            .write()
            .unwrap()
            .retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.store.write().unwrap().clear();
    }

    /// Memoize `load` under `key`: serve a fresh cached value when present,
    /// otherwise run the loader and store its result.
    pub async fn remember<T, F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        load: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            debug!(key, "cache hit");
            return Ok(hit);
        }
        debug!(key, "cache miss");
        let value = load().await?;
        if let Err(e) = self.set(key, &value, ttl) {
            warn!(key, "failed to cache query result: {e}");
        }
        Ok(value)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_after_set_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("k", &vec![1, 2, 3], None).unwrap();
        assert_eq!(cache.get::<Vec<i32>>("k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn expired_entry_is_evicted() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("k", &"value", Some(Duration::ZERO)).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get::<String>("k"), None);
        // evicted, not just hidden
        assert!(cache.get_raw("k").is_none());
    }

    #[test]
    fn prefix_invalidation() {
        let cache = ResponseCache::default();
        cache.set("catalog:list:a", &1, None).unwrap();
        cache.set("catalog:search:b", &2, None).unwrap();
        cache.set("pages:about", &3, None).unwrap();
        cache.invalidate_prefix("catalog:");
        assert_eq!(cache.get::<i32>("catalog:list:a"), None);
        assert_eq!(cache.get::<i32>("catalog:search:b"), None);
        assert_eq!(cache.get::<i32>("pages:about"), Some(3));
    }

    #[tokio::test]
    async fn remember_runs_loader_once() {
        let cache = ResponseCache::default();
        let mut calls = 0u32;
        for _ in 0..3 {
            let value: Result<i32, std::convert::Infallible> = cache
                .remember("answer", None, || {
                    calls += 1;
                    async { Ok(42) }
                })
                .await;
            assert_eq!(value.unwrap(), 42);
        }
        assert_eq!(calls, 1);
    }
}
