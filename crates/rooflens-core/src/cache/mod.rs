//! Pluggable cache store abstraction
//!
//! The pipeline caches insight records in a key-value store with TTL-based
//! expiry. Two implementations:
//!
//! - `HttpKvStore`: Upstash-style REST key-value service (production)
//! - `MemoryStore`: moka-backed in-process cache (tests, single-node dev)
//!
//! # Configuration
//!
//! Environment variables:
//! - `KV_REST_API_URL`: REST KV endpoint (enables the HTTP store)
//! - `KV_REST_API_TOKEN`: bearer token for the REST KV endpoint

mod http_kv;
mod memory;

pub use http_kv::HttpKvStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::insight::pipeline::DEFAULT_TTL_SECONDS;

/// Trait defining the key-value interface the pipeline needs
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after the given number of seconds
    async fn set(&self, key: &str, value: &str, expire_after_seconds: u64) -> Result<()>;
}

/// Concrete cache client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum CacheClient {
    /// REST key-value service (Upstash-style command API)
    Http(HttpKvStore),
    /// In-process TTL cache
    Memory(MemoryStore),
}

impl CacheClient {
    /// Create a cache client from environment variables
    ///
    /// Returns the HTTP store when `KV_REST_API_URL` and `KV_REST_API_TOKEN`
    /// are set, None otherwise (callers typically fall back to `memory()`).
    pub fn from_env() -> Option<Self> {
        HttpKvStore::from_env().map(CacheClient::Http)
    }

    /// Create an HTTP KV store client directly
    pub fn http(base_url: &str, token: &str) -> Self {
        CacheClient::Http(HttpKvStore::new(base_url, token))
    }

    /// Create an in-process cache with the standard insight TTL
    pub fn memory() -> Self {
        CacheClient::Memory(MemoryStore::new(DEFAULT_TTL_SECONDS))
    }

    /// Create an in-process cache with a custom TTL
    pub fn memory_with_ttl(ttl_seconds: u64) -> Self {
        CacheClient::Memory(MemoryStore::new(ttl_seconds))
    }

    /// Short store kind for status output
    pub fn kind(&self) -> &'static str {
        match self {
            CacheClient::Http(_) => "http-kv",
            CacheClient::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl CacheStore for CacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            CacheClient::Http(s) => s.get(key).await,
            CacheClient::Memory(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, expire_after_seconds: u64) -> Result<()> {
        match self {
            CacheClient::Http(s) => s.set(key, value, expire_after_seconds).await,
            CacheClient::Memory(s) => s.set(key, value, expire_after_seconds).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let cache = CacheClient::memory();
        assert_eq!(cache.get("insights:1 Elm St").await.unwrap(), None);

        cache
            .set("insights:1 Elm St", r#"{"address":"1 Elm St"}"#, 60)
            .await
            .unwrap();

        assert_eq!(
            cache.get("insights:1 Elm St").await.unwrap().as_deref(),
            Some(r#"{"address":"1 Elm St"}"#)
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(CacheClient::memory().kind(), "memory");
        assert_eq!(
            CacheClient::http("http://localhost:8079", "token").kind(),
            "http-kv"
        );
    }
}
