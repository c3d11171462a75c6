//! Property insight pipeline
//!
//! - [`types`]: the `PropertyInsight` record, defaults table, and the pure
//!   merge that applies field-level defaulting to a generation outcome
//! - [`pipeline`]: the cache-then-generate orchestration
//! - [`events`]: structured diagnostics emitted to an injected observer

pub mod events;
pub mod pipeline;
pub mod types;

pub use events::{EventSink, InsightEvent, TracingSink};
pub use pipeline::{InsightPipeline, CACHE_KEY_PREFIX, DEFAULT_TTL_SECONDS};
pub use types::{assemble, defaults, fallback_insight, GenerationOutcome, PropertyInsight};
