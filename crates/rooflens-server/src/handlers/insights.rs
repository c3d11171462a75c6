//! Insight handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppError, AppState};
use rooflens_core::PropertyInsight;

/// Request body for insight generation
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    /// Property address as entered by the user
    pub address: String,
}

/// POST /api/insights - Get cached or freshly generated insights
///
/// Always returns a fully-populated record for a non-empty address; every
/// upstream failure degrades to the fallback record inside the pipeline.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<PropertyInsight>, AppError> {
    if request.address.trim().is_empty() {
        return Err(AppError::bad_request("address must not be empty"));
    }

    let insight = state.pipeline.get_or_generate(&request.address).await?;

    Ok(Json(insight))
}
