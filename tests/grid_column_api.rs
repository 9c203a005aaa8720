//! HTTP-level tests for `/api/grid-columns`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_configuration, delete, get, header, patch_json, post_json, test_state};
use serde_json::json;

#[tokio::test]
async fn create_embeds_owner_summary() {
    let state = test_state();
    let owner = create_configuration(&state, "Orders Grid").await;
    let response = post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "width": 120, "gridConfiguration": { "id": owner } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(header(&response, "x-gmodule-alert"), "gmodule.gmoduleGridColumn.created");
    let json = body_json(response).await;
    assert_eq!(json["dataField"], "amount");
    assert_eq!(json["width"], 120);
    assert_eq!(json["gridConfiguration"], json!({ "id": owner, "gridName": "Orders Grid" }));
}

#[tokio::test]
async fn null_data_field_is_rejected_and_nothing_is_stored() {
    let state = test_state();
    let response = post_json(build_test_app(&state), "/api/grid-columns", json!({ "dataField": null })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(&state), "/api/grid-columns").await;
    assert_eq!(header(&response, "x-total-count"), "0");
}

#[tokio::test]
async fn overlong_caption_is_rejected() {
    let state = test_state();
    let response = post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "caption": "c".repeat(256) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_owner_is_rejected() {
    let state = test_state();
    let response = post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "gridConfiguration": { "id": 404 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn eagerload_false_keeps_owner_id_only() {
    let state = test_state();
    let owner = create_configuration(&state, "Orders Grid").await;
    post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "gridConfiguration": { "id": owner } }),
    )
    .await;

    let response = get(build_test_app(&state), "/api/grid-columns?eagerload=false").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["gridConfiguration"], json!({ "id": owner }));

    let response = get(build_test_app(&state), "/api/grid-columns").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["gridConfiguration"]["gridName"], "Orders Grid");
}

#[tokio::test]
async fn patch_can_move_column_to_another_configuration() {
    let state = test_state();
    let first = create_configuration(&state, "Orders Grid").await;
    let second = create_configuration(&state, "Invoices Grid").await;
    let response = post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "caption": "Amount", "gridConfiguration": { "id": first } }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(&state),
        &format!("/api/grid-columns/{id}"),
        json!({ "id": id, "gridConfiguration": { "id": second } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["caption"], "Amount");
    assert_eq!(json["gridConfiguration"]["gridName"], "Invoices Grid");
}

#[tokio::test]
async fn deleting_owner_leaves_column_unassigned() {
    let state = test_state();
    let owner = create_configuration(&state, "Orders Grid").await;
    post_json(
        build_test_app(&state),
        "/api/grid-columns",
        json!({ "dataField": "amount", "gridConfiguration": { "id": owner } }),
    )
    .await;

    let response = delete(build_test_app(&state), &format!("/api/grid-configurations/{owner}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(&state), "/api/grid-columns/unassigned").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["dataField"], "amount");
    assert!(json[0]["gridConfiguration"].is_null());
}
