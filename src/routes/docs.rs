//! OpenAPI document for the resource schemas.

use crate::dto::{GridColumnDto, GridConfigurationDto, GridConfigurationRef, GridLayoutDto, GridToolbarItemDto};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "grid-config"),
    components(schemas(
        GridConfigurationDto,
        GridConfigurationRef,
        GridColumnDto,
        GridToolbarItemDto,
        GridLayoutDto
    ))
)]
pub struct ApiDoc;

async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /v3/api-docs
pub fn docs_routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/v3/api-docs", get(api_docs))
}
