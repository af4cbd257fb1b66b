//! Small documents served from the edge itself.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::IntoResponse,
};

use crate::api::dto::matrix::{ClientDiscovery, ServerDiscovery};
use crate::state::AppState;

const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

/// `GET /.well-known/matrix/server`
pub async fn matrix_server_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServerDiscovery::for_host(
        &state.policy.site().federation_host,
    ))
}

/// `GET /.well-known/matrix/client`
///
/// Browsers fetch this cross-origin, so any origin may read it.
pub async fn matrix_client_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        )],
        Json(ClientDiscovery::for_host(
            &state.policy.site().federation_host,
        )),
    )
}

/// `GET /robots.txt`
pub async fn robots_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        ROBOTS_TXT,
    )
}
