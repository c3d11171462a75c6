//! Test utilities for rooflens-core
//!
//! In-process mock servers for the two external services the pipeline
//! talks to: a Groq-style chat completions endpoint and an Upstash-style
//! REST KV endpoint. Used by integration tests to exercise the real HTTP
//! clients end to end.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Mock Groq server for testing
///
/// Serves `POST /v1/chat/completions` returning a completion whose content
/// is the configured text, and `GET /v1/models` for health checks.
pub struct MockGroqServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGroqServer {
    /// Start a mock server completing every request with `content`
    pub async fn start(content: &str) -> Self {
        let content = Arc::new(content.to_string());

        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_completion))
            .with_state(content);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockGroqServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_models() -> Json<Value> {
    Json(json!({
        "object": "list",
        "data": [{"id": "llama3-70b-8192", "object": "model"}]
    }))
}

async fn handle_chat_completion(
    State(content): State<Arc<String>>,
    Json(_request): Json<Value>,
) -> Json<Value> {
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama3-70b-8192",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content.as_str()},
            "finish_reason": "stop"
        }]
    }))
}

/// Shared state of a mock KV server
type KvEntries = Arc<Mutex<HashMap<String, String>>>;

/// Mock REST KV server for testing
///
/// Implements the Upstash-style command endpoint for the GET and SET
/// commands the cache store issues.
pub struct MockKvServer {
    addr: SocketAddr,
    entries: KvEntries,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockKvServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let entries: KvEntries = Arc::new(Mutex::new(HashMap::new()));

        let app = Router::new()
            .route("/", post(handle_command))
            .with_state(entries.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            entries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of stored entries (expiry is not simulated)
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockKvServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Incoming command array, e.g. ["SET", key, value, "EX", "86400"]
#[derive(Debug, Deserialize)]
struct Command(Vec<String>);

async fn handle_command(
    State(entries): State<KvEntries>,
    Json(Command(cmd)): Json<Command>,
) -> Json<Value> {
    let mut entries = entries.lock().unwrap();

    match cmd.first().map(String::as_str) {
        Some("GET") if cmd.len() == 2 => match entries.get(&cmd[1]) {
            Some(value) => Json(json!({ "result": value })),
            None => Json(json!({ "result": null })),
        },
        Some("SET") if cmd.len() >= 3 => {
            entries.insert(cmd[1].clone(), cmd[2].clone());
            Json(json!({ "result": "OK" }))
        }
        _ => Json(json!({ "error": format!("ERR unsupported command: {:?}", cmd) })),
    }
}
