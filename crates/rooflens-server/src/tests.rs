//! Server tests
//!
//! Exercise the router end-to-end with a mock AI backend and an in-process
//! cache, using tower's oneshot service utilities.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rooflens_core::{AIClient, CacheClient, InsightPipeline, MockBackend};

use crate::{create_router, ServerConfig};

fn test_router(backend: MockBackend) -> Router {
    let pipeline = InsightPipeline::new(AIClient::Mock(backend), CacheClient::memory());
    create_router(pipeline, ServerConfig::default())
}

fn insight_request(address: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/insights")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "address": address }).to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_insights_returns_full_record() {
    let app = test_router(MockBackend::new());

    let response = app
        .oneshot(insight_request("123 Main St, Springfield"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["address"], "123 Main St, Springfield");
    assert!(body["roofCondition"].is_string());
    assert!(body["maintenanceRecommendations"].is_array());
    assert!(body["confidence"].is_number());
}

#[tokio::test]
async fn test_generate_insights_blank_address_is_rejected() {
    let app = test_router(MockBackend::new());

    let response = app.oneshot(insight_request("   ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "address must not be empty");
}

#[tokio::test]
async fn test_generate_insights_survives_backend_failure() {
    let app = test_router(MockBackend::failing("rate limited"));

    let response = app.oneshot(insight_request("1 Elm St")).await.unwrap();

    // The pipeline absorbs the failure; the API still serves a record.
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["address"], "1 Elm St");
    assert_eq!(
        body["stormRisk"],
        "Medium - property is in an area with occasional severe weather"
    );
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let backend = MockBackend::new();
    let app = test_router(backend.clone());

    let first = app
        .clone()
        .oneshot(insight_request("1 Elm St"))
        .await
        .unwrap();
    let second = app.oneshot(insight_request("1 Elm St")).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 1);

    assert_eq!(body_json(first).await, body_json(second).await);
}

#[tokio::test]
async fn test_health_reports_backend_and_cache() {
    let app = test_router(MockBackend::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ai_model"], "mock");
    assert_eq!(body["cache"], "memory");
}

#[tokio::test]
async fn test_health_degraded_when_backend_down() {
    let app = test_router(MockBackend::unhealthy());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["ai_healthy"], false);
}
