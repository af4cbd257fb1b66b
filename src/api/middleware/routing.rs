//! Host routing middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::api::handlers::render_error_page;
use crate::domain::routing::{RequestTarget, RoutingDecision, dispatch};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::{extract_host, extract_scheme};

/// Runs every request through dispatch and the routing policy.
///
/// # Decision Handling
///
/// - **PassThrough**: the [`crate::domain::routing::DispatchHint`] is stored in
///   the request extensions and the request continues to the router
/// - **Redirect**: answered here with `Location` and the decided status
/// - **Forbidden**: answered here with the rendered error page
///
/// # Errors
///
/// Returns `400 Bad Request` if the request carries no usable host.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), routing::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = extract_host(req.headers(), req.uri(), state.behind_proxy)?;
    let scheme = extract_scheme(req.headers(), req.uri(), state.behind_proxy);
    let target = RequestTarget::new(scheme, &host, req.uri().path(), req.uri().query());

    let hint = dispatch(&target, state.policy.site());

    match state.policy.evaluate(&target, hint, state.app_env) {
        RoutingDecision::PassThrough => {
            req.extensions_mut().insert(hint);
            Ok(next.run(req).await)
        }
        RoutingDecision::Redirect { location, status } => {
            debug!(host = %target.host, path = %target.path, %location, status = status.code(), "Redirecting");

            let status = StatusCode::from_u16(status.code()).map_err(|_| {
                AppError::internal("Invalid redirect status", json!({ "status": status.code() }))
            })?;
            let location = HeaderValue::from_str(&location).map_err(|_| {
                AppError::bad_request("Unrepresentable redirect target", json!({ "location": location }))
            })?;

            Ok((status, [(header::LOCATION, location)]).into_response())
        }
        RoutingDecision::Forbidden { page } => {
            debug!(host = %target.host, path = %target.path, status = page.code(), "Refusing request");
            Ok(render_error_page(page))
        }
    }
}
