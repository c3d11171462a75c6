//! REST key-value store client
//!
//! Speaks the Upstash-style single-command REST protocol: each request
//! POSTs a Redis command array to the base URL and receives a
//! `{"result": ...}` or `{"error": "..."}` envelope. This is the protocol
//! behind the hosted KV services the dashboard deploys against.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::CacheStore;

/// REST KV store client
#[derive(Clone)]
pub struct HttpKvStore {
    http_client: Client,
    base_url: String,
    token: String,
}

impl HttpKvStore {
    /// Create a new REST KV client
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `KV_REST_API_URL`, `KV_REST_API_TOKEN`
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("KV_REST_API_URL").ok()?;
        let token = std::env::var("KV_REST_API_TOKEN").ok()?;
        Some(Self::new(&url, &token))
    }

    /// The configured endpoint (for logging)
    pub fn host(&self) -> &str {
        &self.base_url
    }

    /// Execute one command against the REST endpoint
    async fn command(&self, cmd: &[&str]) -> Result<Value> {
        let response = self
            .http_client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&cmd)
            .send()
            .await
            .map_err(|e| Error::Cache(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Cache(format!(
                "KV API error {}",
                response.status()
            )));
        }

        let envelope: CommandResponse = response
            .json()
            .await
            .map_err(|e| Error::Cache(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(Error::Cache(error));
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

/// REST KV response envelope
#[derive(Debug, Deserialize)]
struct CommandResponse {
    result: Option<Value>,
    error: Option<String>,
}

#[async_trait]
impl CacheStore for HttpKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(Error::Cache(format!(
                "unexpected GET reply type: {}",
                other
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str, expire_after_seconds: u64) -> Result<()> {
        let ttl = expire_after_seconds.to_string();
        self.command(&["SET", key, value, "EX", &ttl]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new_trims_trailing_slash() {
        let store = HttpKvStore::new("https://kv.example.com/", "token");
        assert_eq!(store.host(), "https://kv.example.com");
    }

    #[test]
    fn test_envelope_deserialization() {
        let ok: CommandResponse = serde_json::from_str(r#"{"result": "OK"}"#).unwrap();
        assert_eq!(ok.result, Some(Value::String("OK".to_string())));
        assert!(ok.error.is_none());

        let miss: CommandResponse = serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert!(matches!(miss.result, Some(Value::Null) | None));

        let err: CommandResponse =
            serde_json::from_str(r#"{"error": "WRONGPASS invalid token"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("WRONGPASS invalid token"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_cache_error() {
        let store = HttpKvStore::new("http://127.0.0.1:1", "token");
        let err = store.get("insights:1 Elm St").await.unwrap_err();
        assert!(matches!(err, Error::Cache(_)));
    }
}
