//! Process-local keyed cache with single-flight population.
//!
//! Keys map to JSON byte payloads. Entries have no expiry; they are removed
//! only by explicit invalidation or process exit.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};

use taskboard_core::cache::{KeyedCache, Populate, Result};

/// In-memory [`KeyedCache`] implementation.
///
/// Each key owns a `tokio::sync::OnceCell`. The cell serializes concurrent
/// populations, so a miss races at most one supplier against the store and
/// every waiting caller observes that supplier's result. A failed population
/// leaves the cell empty, so the next read retries.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Vec<u8>>>>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    async fn cell(&self, key: &str) -> Arc<OnceCell<Vec<u8>>> {
        let mut entries = self.entries.lock().await;
        entries.entry(key.to_string()).or_default().clone()
    }
}

#[async_trait]
impl KeyedCache for MemoryCache {
    async fn get_with(&self, key: &str, populate: Populate) -> Result<Vec<u8>> {
        let cell = self.cell(key).await;

        if let Some(value) = cell.get() {
            tracing::trace!(key, "Cache hit");
            return Ok(value.clone());
        }

        tracing::trace!(key, "Cache miss");
        let value = cell.get_or_try_init(|| populate).await?;
        Ok(value.clone())
    }

    async fn delete(&self, key: &str) {
        let removed = self.entries.lock().await.remove(key).is_some();
        tracing::trace!(key, removed, "Cache invalidated");
    }
}
