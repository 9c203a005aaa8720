//! Resource routes under `/api`.

use crate::handlers::layout::{layout, unassigned_columns, unassigned_toolbar_items};
use crate::handlers::resource::{create, delete, list, partial_update, read, update};
use crate::handlers::{GridColumnResource, GridConfigurationResource, GridToolbarItemResource, Resource};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Collection and item routes of one resource.
fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/{}", R::COLLECTION);
    let item = format!("/{}/:id", R::COLLECTION);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(read::<R>)
                .put(update::<R>)
                .patch(partial_update::<R>)
                .delete(delete::<R>),
        )
}

pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<GridConfigurationResource>())
        .merge(resource_routes::<GridColumnResource>())
        .merge(resource_routes::<GridToolbarItemResource>())
        .route("/grid-configurations/:id/layout", get(layout))
        .route("/grid-columns/unassigned", get(unassigned_columns))
        .route("/grid-toolbar-items/unassigned", get(unassigned_toolbar_items))
}
