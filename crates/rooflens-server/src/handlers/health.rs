//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use rooflens_core::AIBackend;

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_host: String,
    pub ai_model: String,
    pub ai_healthy: bool,
    pub cache: &'static str,
}

/// GET /api/health - Report configured backends and probe AI reachability
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ai = state.pipeline.ai();
    let ai_healthy = ai.health_check().await;

    Json(HealthResponse {
        status: if ai_healthy { "ok" } else { "degraded" },
        ai_host: ai.host().to_string(),
        ai_model: ai.model().to_string(),
        ai_healthy,
        cache: state.pipeline.cache().kind(),
    })
}
