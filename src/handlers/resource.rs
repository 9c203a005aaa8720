//! Generic REST handlers shared by the three grid resources.

use crate::error::{AppError, AppResult};
use crate::mapper::{EntityMapper, GridColumnMapper, GridConfigurationMapper, GridToolbarItemMapper};
use crate::pagination::ListQuery;
use crate::repository::EntityTable;
use crate::response;
use crate::service::{rules_for, EntityService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

/// One REST resource: its URL collection, alert entity name, and service.
pub trait Resource: Send + Sync + 'static {
    type Mapper: EntityMapper;
    /// Entity name used in alert headers and error details.
    const ENTITY_NAME: &'static str;
    /// Path segment under `/api`.
    const COLLECTION: &'static str;

    fn service(state: &AppState) -> &EntityService<Self::Mapper>;
}

pub struct GridConfigurationResource;
pub struct GridColumnResource;
pub struct GridToolbarItemResource;

impl Resource for GridConfigurationResource {
    type Mapper = GridConfigurationMapper;
    const ENTITY_NAME: &'static str = "gmoduleGridConfiguration";
    const COLLECTION: &'static str = "grid-configurations";

    fn service(state: &AppState) -> &EntityService<Self::Mapper> {
        &state.grid_configurations
    }
}

impl Resource for GridColumnResource {
    type Mapper = GridColumnMapper;
    const ENTITY_NAME: &'static str = "gmoduleGridColumn";
    const COLLECTION: &'static str = "grid-columns";

    fn service(state: &AppState) -> &EntityService<Self::Mapper> {
        &state.grid_columns
    }
}

impl Resource for GridToolbarItemResource {
    type Mapper = GridToolbarItemMapper;
    const ENTITY_NAME: &'static str = "gmoduleGridToolbarItem";
    const COLLECTION: &'static str = "grid-toolbar-items";

    fn service(state: &AppState) -> &EntityService<Self::Mapper> {
        &state.grid_toolbar_items
    }
}

type Dto<R> = <<R as Resource>::Mapper as EntityMapper>::Dto;
type Entity<R> = <<R as Resource>::Mapper as EntityMapper>::Entity;

fn body_to_map(value: Value) -> AppResult<Map<String, Value>> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn parse_dto<R: Resource>(body: Map<String, Value>) -> AppResult<Dto<R>> {
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
}

/// Validate a full body and parse it.
fn full_dto<R: Resource>(body: Value) -> AppResult<Dto<R>> {
    let body = body_to_map(body)?;
    RequestValidator::validate(&body, &rules_for::<Entity<R>>())?;
    parse_dto::<R>(body)
}

/// Shared id checks of PUT and PATCH: body id present, equal to the path id, and stored.
async fn check_id<R: Resource>(state: &AppState, path_id: i64, dto: &Dto<R>) -> AppResult<()> {
    let id = <R::Mapper as EntityMapper>::dto_id(dto).ok_or_else(|| AppError::id_null(R::ENTITY_NAME))?;
    if id != path_id {
        return Err(AppError::id_invalid(R::ENTITY_NAME));
    }
    if !R::service(state).exists(id).await? {
        return Err(AppError::id_not_found(R::ENTITY_NAME));
    }
    Ok(())
}

fn saved_id<R: Resource>(dto: &Dto<R>) -> AppResult<i64> {
    <R::Mapper as EntityMapper>::dto_id(dto).ok_or_else(|| AppError::Internal(format!("{} saved without id", R::ENTITY_NAME)))
}

/// POST /api/{collection}
pub async fn create<R: Resource>(State(state): State<AppState>, Json(body): Json<Value>) -> AppResult<impl IntoResponse> {
    tracing::debug!(resource = R::COLLECTION, "REST request to create");
    let dto = full_dto::<R>(body)?;
    if <R::Mapper as EntityMapper>::dto_id(&dto).is_some() {
        return Err(AppError::id_exists(R::ENTITY_NAME, <Entity<R> as EntityTable>::LABEL));
    }
    let saved = R::service(&state).save(dto).await?;
    let id = saved_id::<R>(&saved)?;
    let mut headers = response::entity_creation_alert(&state.config.app_name, R::ENTITY_NAME, id)?;
    let location = format!("/api/{}/{}", R::COLLECTION, id);
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// PUT /api/{collection}/{id}
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(resource = R::COLLECTION, id, "REST request to update");
    let dto = full_dto::<R>(body)?;
    check_id::<R>(&state, id, &dto).await?;
    let saved = R::service(&state).update(dto).await?;
    let headers = response::entity_update_alert(&state.config.app_name, R::ENTITY_NAME, id)?;
    Ok((headers, Json(saved)))
}

/// PATCH /api/{collection}/{id}: only non-null fields are applied.
pub async fn partial_update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(resource = R::COLLECTION, id, "REST request to partially update");
    let body = body_to_map(body)?;
    RequestValidator::validate_partial(&body, &rules_for::<Entity<R>>())?;
    let dto = parse_dto::<R>(body)?;
    check_id::<R>(&state, id, &dto).await?;
    let saved = R::service(&state)
        .partial_update(id, dto)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", R::ENTITY_NAME, id)))?;
    let headers = response::entity_update_alert(&state.config.app_name, R::ENTITY_NAME, id)?;
    Ok((headers, Json(saved)))
}

/// GET /api/{collection}?page&size&sort&eagerload
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(resource = R::COLLECTION, "REST request to get a page");
    let query = ListQuery::from_pairs(&params)?;
    let service = R::service(&state);
    let items = service.find_all(&query.page, query.fetch).await?;
    let total = service.count_all().await?;
    let headers: HeaderMap = response::pagination(uri.path(), &params, &query.page, total)?;
    Ok((headers, Json(items)))
}

/// GET /api/{collection}/{id}
pub async fn read<R: Resource>(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Dto<R>>> {
    tracing::debug!(resource = R::COLLECTION, id, "REST request to get");
    R::service(&state)
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} {}", R::ENTITY_NAME, id)))
}

/// DELETE /api/{collection}/{id}
pub async fn delete<R: Resource>(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<impl IntoResponse> {
    tracing::debug!(resource = R::COLLECTION, id, "REST request to delete");
    R::service(&state).delete(id).await?;
    let headers = response::entity_deletion_alert(&state.config.app_name, R::ENTITY_NAME, id)?;
    Ok((StatusCode::NO_CONTENT, headers))
}
