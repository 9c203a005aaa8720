//! Layout and unassigned-member handlers.

use crate::dto::{GridColumnDto, GridLayoutDto, GridToolbarItemDto};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /api/grid-configurations/{id}/layout
pub async fn layout(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<GridLayoutDto>> {
    tracing::debug!(id, "REST request to get layout");
    state
        .layouts
        .find_layout(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("gridConfiguration {}", id)))
}

/// GET /api/grid-columns/unassigned
pub async fn unassigned_columns(State(state): State<AppState>) -> AppResult<Json<Vec<GridColumnDto>>> {
    Ok(Json(state.layouts.unassigned_columns().await?))
}

/// GET /api/grid-toolbar-items/unassigned
pub async fn unassigned_toolbar_items(State(state): State<AppState>) -> AppResult<Json<Vec<GridToolbarItemDto>>> {
    Ok(Json(state.layouts.unassigned_toolbar_items().await?))
}
