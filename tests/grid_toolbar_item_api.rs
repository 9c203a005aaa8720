//! HTTP-level tests for `/api/grid-toolbar-items`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_configuration, delete, get, header, patch_json, post_json, put_json, test_state};
use serde_json::json;

#[tokio::test]
async fn crud_round_trip() {
    let state = test_state();
    let owner = create_configuration(&state, "Orders Grid").await;

    let response = post_json(
        build_test_app(&state),
        "/api/grid-toolbar-items",
        json!({ "location": "after", "widget": "dxButton", "text": "Export", "gridConfiguration": { "id": owner } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/grid-toolbar-items/{id}");

    let response = put_json(
        build_test_app(&state),
        &uri,
        json!({ "id": id, "location": "before", "text": "Print" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["location"], "before");
    assert!(json["widget"].is_null());
    assert!(json["gridConfiguration"].is_null());

    let response = delete(build_test_app(&state), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(header(&response, "x-gmodule-alert"), "gmodule.gmoduleGridToolbarItem.deleted");
    let response = get(build_test_app(&state), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_of_missing_item_is_idnotfound() {
    let state = test_state();
    let response = patch_json(
        build_test_app(&state),
        "/api/grid-toolbar-items/3",
        json!({ "id": 3, "text": "Export" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"]["errorKey"], "idnotfound");
}

#[tokio::test]
async fn paging_walks_the_collection() {
    let state = test_state();
    for text in ["one", "two", "three"] {
        post_json(build_test_app(&state), "/api/grid-toolbar-items", json!({ "text": text })).await;
    }

    let response = get(build_test_app(&state), "/api/grid-toolbar-items?page=1&size=2&sort=text,asc").await;
    assert_eq!(header(&response, "x-total-count"), "3");
    let link = header(&response, "link").to_string();
    assert!(link.contains("page=0&size=2>; rel=\"prev\""));
    assert!(!link.contains("rel=\"next\""));
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["text"], "two");
}

#[tokio::test]
async fn unassigned_lists_items_without_owner() {
    let state = test_state();
    let owner = create_configuration(&state, "Orders Grid").await;
    post_json(
        build_test_app(&state),
        "/api/grid-toolbar-items",
        json!({ "text": "owned", "gridConfiguration": { "id": owner } }),
    )
    .await;
    post_json(build_test_app(&state), "/api/grid-toolbar-items", json!({ "text": "loose" })).await;

    let response = get(build_test_app(&state), "/api/grid-toolbar-items/unassigned").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["text"], "loose");
}
