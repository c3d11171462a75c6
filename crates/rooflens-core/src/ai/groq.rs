//! Groq backend implementation
//!
//! Groq serves the OpenAI chat completions API, so this backend also works
//! against any OpenAI-compatible server for local development.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GROQ_API_KEY`: API key (required)
//! - `GROQ_HOST`: Server URL (default: https://api.groq.com/openai)
//! - `GROQ_MODEL`: Model name (default: llama3-70b-8192)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::{insight_system_prompt, insight_user_prompt};

use super::AIBackend;

/// Default Groq API host
pub const DEFAULT_HOST: &str = "https://api.groq.com/openai";

/// Fixed completion model for insight generation
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Groq chat-completions backend
#[derive(Clone)]
pub struct GroqBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GroqBackend {
    /// Create a new Groq backend
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            api_key: self.api_key.clone(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GROQ_API_KEY`
    /// Optional: `GROQ_HOST` (default: https://api.groq.com/openai)
    /// Optional: `GROQ_MODEL` (default: llama3-70b-8192)
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GROQ_API_KEY").ok()?;
        let host = std::env::var("GROQ_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Some(Self::new(&host, &model, &api_key))
    }

    /// Make a chat completion request with a JSON-object response format
    async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Groq API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        // An empty choices list degrades to an empty completion, which the
        // pipeline treats as a malformed response rather than a call failure.
        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

/// Groq chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    stream: bool,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Output-format hint ({"type": "json_object"})
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Groq chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl AIBackend for GroqBackend {
    async fn generate_insight(&self, address: &str) -> Result<String> {
        let response = self
            .chat_completion(insight_system_prompt(), &insight_user_prompt(address))
            .await?;
        debug!(address = %address, "Groq response: {}", response);

        Ok(response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
