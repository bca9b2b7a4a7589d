//! Shared handle bundling the fetcher and the response cache.

use crate::cache::ResponseCache;
use crate::fetcher::Fetcher;
use crate::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// One per process invocation, constructed by the command dispatcher and
/// passed into every feature call. Holding the cache here instead of in
/// module-level state keeps tests isolated and ownership obvious.
pub struct DocsClient {
    fetcher: Fetcher,
    cache: ResponseCache,
}

impl DocsClient {
    /// Creates a client with the standard fetcher configuration.
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            cache: ResponseCache::new(),
        })
    }

    /// Creates a client around a custom fetcher (primarily for tests).
    #[must_use]
    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            cache: ResponseCache::new(),
        }
    }

    /// The underlying HTTP fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Cache wrapper used by every feature module: hit, or produce and store.
    pub async fn cached<T, F, Fut>(&self, key: &str, ttl: Duration, produce: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.cache.get_or_insert_with(key, ttl, produce).await
    }
}

impl std::fmt::Debug for DocsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsClient").finish_non_exhaustive()
    }
}
