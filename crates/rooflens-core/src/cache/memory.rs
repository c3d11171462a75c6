//! In-process cache store
//!
//! Backed by moka with a cache-wide time-to-live. The pipeline writes every
//! record with the one fixed TTL policy, so per-entry expiry is not needed;
//! the store's TTL is fixed at construction and the per-call value is not
//! consulted.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::error::Result;

use super::CacheStore;

/// Upper bound on resident entries; far above any realistic address count
const MAX_ENTRIES: u64 = 10_000;

/// In-process TTL cache store
#[derive(Clone)]
pub struct MemoryStore {
    inner: Cache<String, String>,
    ttl_seconds: u64,
}

impl MemoryStore {
    /// Create a store whose entries expire after `ttl_seconds`
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();

        Self { inner, ttl_seconds }
    }

    /// The cache-wide TTL configured at construction
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _expire_after_seconds: u64) -> Result<()> {
        self.inner.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemoryStore::new(60);
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_overwrite_last_write_wins() {
        let store = MemoryStore::new(60);
        store.set("k", "first", 60).await.unwrap();
        store.set("k", "second", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_ttl_is_recorded() {
        assert_eq!(MemoryStore::new(86_400).ttl_seconds(), 86_400);
    }
}
