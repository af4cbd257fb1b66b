//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                      - Health check (every host)
//! - `GET  /robots.txt`                  - Robots file (every host)
//! - `GET  /.well-known/matrix/server`   - Matrix federation discovery
//! - `GET  /.well-known/matrix/client`   - Matrix client discovery
//! - `GET  /{code}`, `GET /su/{code}`    - Short link redirect (short-link host)
//! - anything else                       - 404 page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Routing** - Host dispatch and routing policy; answers redirects and
//!   forbidden requests before any handler runs

use crate::api::handlers::{
    health_handler, matrix_client_handler, matrix_server_handler, not_found_handler,
    robots_handler, short_link_handler,
};
use crate::api::middleware::{routing, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// The routing middleware wraps the fallback too, so unrouted paths are still
/// subject to host redirects.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/.well-known/matrix/server", get(matrix_server_handler))
        .route("/.well-known/matrix/client", get(matrix_client_handler))
        .route("/{code}", get(short_link_handler))
        .route("/su/{code}", get(short_link_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), routing::layer))
        .with_state(state)
        .layer(tracing::layer())
}
