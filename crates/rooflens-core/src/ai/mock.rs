//! Mock backend for testing
//!
//! Returns a scripted completion for insight requests. Useful for unit
//! tests and development without a Groq API key. The call counter lets
//! tests assert that cache hits do not re-invoke the model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

/// Canned completion: a plausible full insight payload, distinct from the
/// defaults table so tests can tell generated fields from substituted ones.
const CANNED_COMPLETION: &str = r#"{
  "roofCondition": "Asphalt shingle roof in fair condition with granule loss on south face",
  "estimatedAge": "12-15 years",
  "replacementCost": "$14,000 - $18,000",
  "stormRisk": "Elevated - hail corridor",
  "maintenanceRecommendations": ["Replace cracked pipe boots", "Re-seal flashing at chimney"],
  "propertyValueImpact": "Aging roof reduces resale value by roughly $5,000",
  "sustainabilityOptions": ["South-facing slope suitable for solar"],
  "confidence": 0.92
}"#;

#[derive(Clone)]
enum MockReply {
    /// Canned full insight JSON
    Canned,
    /// A fixed raw completion (may be non-JSON to exercise parse failures)
    Text(String),
    /// Fail the call (exercises the provider-error path)
    Fail(String),
}

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    healthy: bool,
    reply: MockReply,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock backend returning the canned insight payload
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: MockReply::Canned,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock backend returning the given completion text verbatim
    pub fn with_response(text: &str) -> Self {
        Self {
            healthy: true,
            reply: MockReply::Text(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock backend whose completion calls fail
    pub fn failing(cause: &str) -> Self {
        Self {
            healthy: false,
            reply: MockReply::Fail(cause.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create an unhealthy mock backend (completions still succeed)
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            reply: MockReply::Canned,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completion calls made against this backend
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate_insight(&self, _address: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            MockReply::Canned => Ok(CANNED_COMPLETION.to_string()),
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(cause) => Err(Error::InvalidData(format!(
                "mock backend failure: {}",
                cause
            ))),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_reply_counts_calls() {
        let mock = MockBackend::new();
        assert_eq!(mock.call_count(), 0);

        let completion = mock.generate_insight("1 Elm St").await.unwrap();
        assert!(completion.contains("roofCondition"));
        assert_eq!(mock.call_count(), 1);

        // Clones share the counter, so the pipeline's copy is observable.
        let clone = mock.clone();
        clone.generate_insight("1 Elm St").await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_reply() {
        let mock = MockBackend::with_response("not json");
        assert_eq!(mock.generate_insight("1 Elm St").await.unwrap(), "not json");
    }

    #[tokio::test]
    async fn test_failing_reply() {
        let mock = MockBackend::failing("connection refused");
        let err = mock.generate_insight("1 Elm St").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(MockBackend::new().health_check().await);
        assert!(!MockBackend::unhealthy().health_check().await);
    }
}
