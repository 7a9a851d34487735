//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /r/{id}`  - Tracked link redirect (public)
//! - `GET /r`       - Explicit 400 for redirect requests without an id
//! - `GET /health`  - Health check: database and queue (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, missing_id_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .route("/r", get(missing_id_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
