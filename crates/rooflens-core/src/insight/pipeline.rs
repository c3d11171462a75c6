//! The property insight pipeline
//!
//! Cache lookup, single completion call, field-level defaulting, cache
//! write. Every failure mode inside the pipeline degrades to the fallback
//! record; for any non-empty address the operation always returns a fully
//! populated [`PropertyInsight`].

use std::sync::Arc;

use crate::ai::{parsing, AIBackend, AIClient};
use crate::cache::{CacheClient, CacheStore};
use crate::error::{Error, Result};

use super::events::{EventSink, InsightEvent, TracingSink};
use super::types::{assemble, GenerationOutcome, PropertyInsight};

/// Cache key prefix for insight records
pub const CACHE_KEY_PREFIX: &str = "insights:";

/// Fixed record lifetime in the cache store (24 hours)
pub const DEFAULT_TTL_SECONDS: u64 = 86_400;

/// Generate-and-cache pipeline for property insights
///
/// Holds injected client handles only; environment wiring happens once at
/// process start in the server/CLI. Cheap to share behind an `Arc`.
pub struct InsightPipeline {
    ai: AIClient,
    cache: CacheClient,
    ttl_seconds: u64,
    events: Arc<dyn EventSink>,
}

impl InsightPipeline {
    /// Create a pipeline with the default tracing event sink
    pub fn new(ai: AIClient, cache: CacheClient) -> Self {
        Self::with_events(ai, cache, Arc::new(TracingSink))
    }

    /// Create a pipeline with a custom event sink
    pub fn with_events(ai: AIClient, cache: CacheClient, events: Arc<dyn EventSink>) -> Self {
        Self {
            ai,
            cache,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            events,
        }
    }

    /// Override the cache TTL (tests only use this in practice)
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// The configured AI client (for health reporting)
    pub fn ai(&self) -> &AIClient {
        &self.ai
    }

    /// The configured cache client (for status reporting)
    pub fn cache(&self) -> &CacheClient {
        &self.cache
    }

    /// Cache key for an address; no normalization, so textual variants of
    /// the same address are distinct entries
    pub fn cache_key(address: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, address)
    }

    /// Return the cached insight record for an address, generating and
    /// caching one if absent
    ///
    /// Errors only on a blank address. Cache failures degrade to a miss,
    /// completion failures degrade to the fallback record. A record built
    /// from a failed completion call is returned but NOT cached, so the
    /// next request for that address re-attempts generation; a record
    /// built from an unparsable completion IS cached.
    pub async fn get_or_generate(&self, address: &str) -> Result<PropertyInsight> {
        if address.trim().is_empty() {
            return Err(Error::InvalidData("address must not be empty".into()));
        }

        let key = Self::cache_key(address);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => {
                // A corrupt entry is regenerated rather than surfaced.
                if let Ok(insight) = serde_json::from_str::<PropertyInsight>(&raw) {
                    self.events.emit(InsightEvent::CacheHit {
                        address: address.to_string(),
                    });
                    return Ok(insight);
                }
            }
            Ok(None) => {}
            Err(e) => {
                self.events.emit(InsightEvent::CacheUnavailable {
                    address: address.to_string(),
                    cause: e.to_string(),
                });
            }
        }

        self.events.emit(InsightEvent::GenerationStarted {
            address: address.to_string(),
        });

        // Single attempt: no retry, no backoff, no streaming.
        let completion = match self.ai.generate_insight(address).await {
            Ok(text) => text,
            Err(e) => {
                self.events.emit(InsightEvent::GenerationFailed {
                    address: address.to_string(),
                    cause: e.to_string(),
                });
                return Ok(assemble(address, &GenerationOutcome::ProviderError));
            }
        };

        let outcome = parsing::parse_outcome(&completion);
        if matches!(outcome, GenerationOutcome::MalformedResponse) {
            self.events.emit(InsightEvent::ParseFailed {
                address: address.to_string(),
            });
        }

        let insight = assemble(address, &outcome);
        self.write_to_cache(address, &key, &insight).await;

        Ok(insight)
    }

    async fn write_to_cache(&self, address: &str, key: &str, insight: &PropertyInsight) {
        let serialized = match serde_json::to_string(insight) {
            Ok(s) => s,
            Err(e) => {
                self.events.emit(InsightEvent::CacheWriteFailed {
                    address: address.to_string(),
                    cause: e.to_string(),
                });
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &serialized, self.ttl_seconds).await {
            self.events.emit(InsightEvent::CacheWriteFailed {
                address: address.to_string(),
                cause: e.to_string(),
            });
        }
    }
}
