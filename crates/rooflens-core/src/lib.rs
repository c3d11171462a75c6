//! Rooflens Core Library
//!
//! Shared functionality for the Rooflens roof intelligence toolkit:
//! - The property insight pipeline (generate-and-cache with fallback)
//! - Pluggable AI backends (Groq, mock)
//! - Pluggable cache stores (REST KV, in-process)
//! - Embedded prompt templates
//! - Structured diagnostic events

pub mod ai;
pub mod cache;
pub mod error;
pub mod insight;
pub mod prompts;

/// Test utilities including mock Groq and KV servers
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, GroqBackend, MockBackend};
pub use cache::{CacheClient, CacheStore, HttpKvStore, MemoryStore};
pub use error::{Error, Result};
pub use insight::{
    EventSink, GenerationOutcome, InsightEvent, InsightPipeline, PropertyInsight, TracingSink,
    DEFAULT_TTL_SECONDS,
};
