use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use super::Result;

/// Future driven by [`KeyedCache::get_with`] to compute a missing value.
///
/// Suppliers are built eagerly at the call site, capturing an owned store
/// handle, but are only polled on a cache miss.
pub type Populate = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send>>;

/// Process-wide keyed memoization store.
///
/// Values live until explicitly deleted or the process exits; there is no
/// expiry and no eviction. The cache is shared across every entity service,
/// distinguished only by key.
#[async_trait]
pub trait KeyedCache: Send + Sync {
    /// Returns the value stored under `key`, driving `populate` on a miss.
    ///
    /// Concurrent misses on the same key must share a single population run;
    /// every caller observes that run's result. When the population fails the
    /// error propagates, nothing is stored, and the key remains populatable.
    async fn get_with(&self, key: &str, populate: Populate) -> Result<Vec<u8>>;

    /// Removes the entry for `key`. No-op when absent; never fails.
    async fn delete(&self, key: &str);
}
