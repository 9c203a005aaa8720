#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use grid_config::{AppConfig, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// In-memory state with default settings. Clones share the same tables.
pub fn test_state() -> AppState {
    AppState::local(AppConfig::default())
}

/// The production router over `state`.
pub fn build_test_app(state: &AppState) -> Router {
    grid_config::app(state.clone())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json)).await
}

pub async fn patch_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a configuration through the API and return its id.
pub async fn create_configuration(state: &AppState, name: &str) -> i64 {
    let response = post_json(
        build_test_app(state),
        "/api/grid-configurations",
        serde_json::json!({ "gridName": name }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response.headers()[name].to_str().unwrap()
}
