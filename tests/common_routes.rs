//! Health, readiness, version and API docs on the in-memory backend.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_state};

#[tokio::test]
async fn health_is_ok() {
    let response = get(build_test_app(&test_state()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn local_backend_is_ready() {
    let response = get(build_test_app(&test_state()), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["database"], "local");
}

#[tokio::test]
async fn version_reports_package() {
    let json = body_json(get(build_test_app(&test_state()), "/version").await).await;
    assert_eq!(json["name"], "grid-config");
}

#[tokio::test]
async fn api_docs_describe_resource_schemas() {
    let response = get(build_test_app(&test_state()), "/v3/api-docs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["components"]["schemas"]["GridColumnDto"].is_object());
    assert!(json["components"]["schemas"]["GridConfigurationDto"]["properties"]["gridName"].is_object());
}
