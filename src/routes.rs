//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`              - create a short URL
//! - `GET  /health`               - liveness check
//! - `GET  /api/mappings`         - list mappings by owner
//! - `DELETE /api/mappings/{code}` - remove a mapping
//! - `GET  /{code}`               - short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Path normalization** - trailing slash handling

use axum::routing::{delete, get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    delete_mapping_handler, health_handler, list_mappings_handler, redirect_handler,
    shorten_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The catch-all `/{code}` redirect is registered last so the fixed routes
/// take precedence.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/api/mappings", get(list_mappings_handler))
        .route("/api/mappings/{code}", delete(delete_mapping_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
