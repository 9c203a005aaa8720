//! Router assembly.

mod common;
mod docs;
mod entity;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use entity::entity_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full application: common routes, docs, and `/api` resources, with tracing and a body limit.
pub fn app(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    Router::new()
        .merge(common_routes())
        .merge(docs_routes())
        .nest("/api", entity_routes())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
