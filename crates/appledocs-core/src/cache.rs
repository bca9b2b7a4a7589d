//! Time-bounded in-memory response cache.
//!
//! One command invocation issues at most a handful of distinct upstream
//! queries, so the cache is a plain map with per-entry expiry: unbounded,
//! never persisted, lazily evicted on the first read after expiry. Values
//! are stored as `serde_json::Value` so one shared cache can hold every
//! feature's record type; typed access round-trips through serde.
//!
//! There is no single-flight deduplication: two concurrent misses for the
//! same key each run their own producer. With the CLI's fan-out of at most
//! two distinct resources per command that situation does not arise in
//! practice; promoting the first in-flight call to all waiters is a possible
//! enhancement, not a current need.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// TTL for frequently-changing data: single doc pages, the updates feed.
pub const TTL_DOC: Duration = Duration::from_secs(30 * 60);
/// TTL for per-framework symbol indexes.
pub const TTL_INDEX: Duration = Duration::from_secs(60 * 60);
/// TTL for the rarely-changing technology and sample-code catalogs.
pub const TTL_CATALOG: Duration = Duration::from_secs(2 * 60 * 60);

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// Process-scoped TTL cache keyed by [`cache_key`] strings.
///
/// Owned by the command dispatcher and passed into feature calls; there is
/// deliberately no global instance, so tests get isolated caches for free.
#[derive(Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, or `None` when absent or expired.
    ///
    /// An expired entry is evicted on this read.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if Instant::now() <= entry.expires_at => {
                    return serde_json::from_value(entry.value.clone()).ok();
                },
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self.entries.write().await;
            // Re-check under the write lock; another reader may have raced.
            if entries
                .get(key)
                .is_some_and(|entry| Instant::now() > entry.expires_at)
            {
                debug!(key, "evicting expired cache entry");
                entries.remove(key);
            }
        }
        None
    }

    /// Stores `value` under `key`, unconditionally overwriting.
    pub async fn insert<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::Serialization(format!("cache value for '{key}': {e}")))?;
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    /// Returns a hit, or runs `produce` exactly once on miss and stores its
    /// result for `ttl`.
    pub async fn get_or_insert_with<T, F, Fut>(&self, key: &str, ttl: Duration, produce: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        debug!(key, "cache miss");
        let value = produce().await?;
        self.insert(key, &value, ttl).await?;
        Ok(value)
    }
}

/// Builds a deterministic cache key from a command name and its parameters.
///
/// Parameters are sorted lexicographically by name, so insertion order never
/// affects the key, and unset (`None`) parameters are omitted entirely: two
/// calls differing only in an unset optional parameter share a key, which is
/// the same effective query. Separator characters inside values are escaped,
/// so distinct parameter sets never collapse onto one key.
#[must_use]
pub fn cache_key(command: &str, params: &[(&str, Option<&str>)]) -> String {
    let mut set: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(name, value)| value.map(|v| (*name, v)))
        .collect();
    set.sort_unstable_by_key(|(name, _)| *name);

    let mut key = String::from(command);
    for (name, value) in set {
        key.push_str(&format!(":{name}={}", escape_value(value)));
    }
    key
}

fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('=', "\\=")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_cache_key_invariant_under_parameter_order() {
        let a = cache_key("search", &[("query", Some("swift")), ("type", Some("doc"))]);
        let b = cache_key("search", &[("type", Some("doc")), ("query", Some("swift"))]);
        assert_eq!(a, b);
        assert_eq!(a, "search:query=swift:type=doc");
    }

    #[test]
    fn test_cache_key_omits_unset_parameters() {
        let with_none = cache_key(
            "samples",
            &[("framework", None), ("search", Some("metal"))],
        );
        let without = cache_key("samples", &[("search", Some("metal"))]);
        assert_eq!(with_none, without);
        assert!(!with_none.contains("framework"));
    }

    #[test]
    fn test_cache_key_no_parameters() {
        assert_eq!(cache_key("technologies", &[]), "technologies");
    }

    #[test]
    fn test_cache_key_separators_in_values_do_not_collide() {
        // A value that spells out another parameter must not produce the
        // same key as actually passing that parameter.
        let smuggled = cache_key("search", &[("query", Some("x:type=Documentation"))]);
        let split = cache_key(
            "search",
            &[("query", Some("x")), ("type", Some("Documentation"))],
        );
        assert_ne!(smuggled, split);

        let backslash = cache_key("search", &[("query", Some("a\\:b"))]);
        let colon = cache_key("search", &[("query", Some("a\\"))]);
        assert_ne!(backslash, colon);
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache = ResponseCache::new();

        cache
            .insert("short", &"gone".to_string(), Duration::from_millis(1))
            .await
            .unwrap();
        cache
            .insert("long", &"kept".to_string(), Duration::from_millis(60_000))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(cache.get::<String>("short").await, None);
        assert_eq!(cache.get::<String>("long").await, Some("kept".to_string()));
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = ResponseCache::new();
        cache
            .insert("k", &1u32, Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .insert("k", &2u32, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get::<u32>("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_get_or_insert_with_runs_producer_once() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value: u32 = cache
                .get_or_insert_with("counted", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(41 + 1)
                })
                .await
                .unwrap();
            assert_eq!(value, 42);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_insert_with_propagates_producer_error() {
        let cache = ResponseCache::new();

        let result: Result<u32> = cache
            .get_or_insert_with("failing", Duration::from_secs(60), || async {
                Err(Error::Other("producer failed".to_string()))
            })
            .await;

        assert!(result.is_err());
        // A failed producer must not poison the key.
        assert_eq!(cache.get::<u32>("failing").await, None);
    }
}
