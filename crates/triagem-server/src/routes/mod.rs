//! HTTP route handlers.

pub mod health;
pub mod process;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get_service;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let index_page = ServeFile::new(&state.config.index_page);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route_service("/", get_service(index_page))
        .merge(process::routes())
        .merge(health::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
