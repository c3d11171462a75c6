//! Structured diagnostic events for the insight pipeline
//!
//! The pipeline reports what happened (cache hit, generation start, parse
//! failure, ...) to an injected [`EventSink`] instead of logging directly.
//! Observability only: no event affects the record a caller receives.

use tracing::{debug, info, warn};

/// A diagnostic event emitted by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightEvent {
    /// A cached record was returned without calling the model
    CacheHit { address: String },
    /// The cache store failed; the lookup was treated as a miss
    CacheUnavailable { address: String, cause: String },
    /// A generation attempt started for an uncached address
    GenerationStarted { address: String },
    /// The completion text contained no parsable JSON object
    ParseFailed { address: String },
    /// The completion call itself failed; the fallback record was returned
    GenerationFailed { address: String, cause: String },
    /// The assembled record could not be written to the cache
    CacheWriteFailed { address: String, cause: String },
}

impl InsightEvent {
    /// The address this event concerns
    pub fn address(&self) -> &str {
        match self {
            InsightEvent::CacheHit { address }
            | InsightEvent::CacheUnavailable { address, .. }
            | InsightEvent::GenerationStarted { address }
            | InsightEvent::ParseFailed { address }
            | InsightEvent::GenerationFailed { address, .. }
            | InsightEvent::CacheWriteFailed { address, .. } => address,
        }
    }

    /// Short event kind for log fields and test assertions
    pub fn kind(&self) -> &'static str {
        match self {
            InsightEvent::CacheHit { .. } => "cache_hit",
            InsightEvent::CacheUnavailable { .. } => "cache_unavailable",
            InsightEvent::GenerationStarted { .. } => "generation_started",
            InsightEvent::ParseFailed { .. } => "parse_failed",
            InsightEvent::GenerationFailed { .. } => "generation_failed",
            InsightEvent::CacheWriteFailed { .. } => "cache_write_failed",
        }
    }
}

/// Observer for pipeline diagnostics
pub trait EventSink: Send + Sync {
    fn emit(&self, event: InsightEvent);
}

/// Default sink that forwards events to `tracing`
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: InsightEvent) {
        match &event {
            InsightEvent::CacheHit { address } => {
                debug!(address = %address, "Returning cached insights");
            }
            InsightEvent::CacheUnavailable { address, cause } => {
                warn!(address = %address, cause = %cause, "Cache unavailable, treating as miss");
            }
            InsightEvent::GenerationStarted { address } => {
                info!(address = %address, "Generating new insights");
            }
            InsightEvent::ParseFailed { address } => {
                warn!(address = %address, "Failed to parse AI response, using defaults");
            }
            InsightEvent::GenerationFailed { address, cause } => {
                warn!(address = %address, cause = %cause, "Insight generation failed, returning fallback");
            }
            InsightEvent::CacheWriteFailed { address, cause } => {
                warn!(address = %address, cause = %cause, "Failed to cache insight record");
            }
        }
    }
}
