//! Pluggable AI backend abstraction
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for insight generation
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GroqBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (groq, mock). Default: groq
//! - `GROQ_API_KEY`: API key (required for groq backend)
//! - `GROQ_HOST`: Server URL (default: https://api.groq.com/openai)
//! - `GROQ_MODEL`: Model name (default: llama3-70b-8192)

mod groq;
mod mock;
pub mod parsing;

pub use groq::GroqBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Produce the raw completion text for a property analysis request
    ///
    /// One synchronous attempt; retries and fallback policy live in the
    /// pipeline, not the backend.
    async fn generate_insight(&self, address: &str) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for diagnostics)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Groq backend (OpenAI-style chat completions API)
    Groq(GroqBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `groq` (default): uses GROQ_API_KEY, GROQ_HOST, GROQ_MODEL
    /// - `mock`: creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "groq".to_string());

        match backend.to_lowercase().as_str() {
            "groq" => GroqBackend::from_env().map(AIClient::Groq),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to groq");
                GroqBackend::from_env().map(AIClient::Groq)
            }
        }
    }

    /// Create a Groq backend directly
    pub fn groq(host: &str, model: &str, api_key: &str) -> Self {
        AIClient::Groq(GroqBackend::new(host, model, api_key))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn generate_insight(&self, address: &str) -> Result<String> {
        match self {
            AIClient::Groq(b) => b.generate_insight(address).await,
            AIClient::Mock(b) => b.generate_insight(address).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Groq(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Groq(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Groq(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_generates_parsable_insight() {
        let client = AIClient::mock();
        let completion = client.generate_insight("123 Main St").await.unwrap();
        assert!(completion.contains("roofCondition"));
    }
}
