//! Handler for short link redirects.

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::api::handlers::render_error_page;
use crate::domain::routing::{DispatchHint, ErrorPage};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}` and `GET /su/{code}` on the short-link host.
///
/// # Request Flow
///
/// 1. Check the routing middleware recognised the request as a short link
/// 2. Resolve the code as a custom alias, then as a generated slug
/// 3. Return 302 Found to the destination
///
/// The redirect forwards the full referrer to the destination and may only
/// be cached privately for 90 seconds.
///
/// # Errors
///
/// Renders the 404 page if the request is not a short-link request or no
/// active link answers to the code. Store failures return 503 JSON.
pub async fn short_link_handler(
    State(state): State<AppState>,
    hint: Option<Extension<DispatchHint>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    if !matches!(hint, Some(Extension(DispatchHint::ShortLink))) {
        return render_error_page(ErrorPage::NotFound);
    }

    let host = match extract_host(&headers, &uri, state.behind_proxy) {
        Ok(host) => host,
        Err(e) => return e.into_response(),
    };

    match state.short_link_service.resolve(&host, uri.path()).await {
        Ok(link) => {
            debug!(id = link.id, "Short link hit");
            redirect_to(&link.destination_url).unwrap_or_else(IntoResponse::into_response)
        }
        Err(AppError::NotFound { .. }) => render_error_page(ErrorPage::NotFound),
        Err(e) => {
            error!(error = %e, path = uri.path(), "Short link resolution failed");
            e.into_response()
        }
    }
}

fn redirect_to(destination: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(destination).map_err(|_| {
        AppError::internal(
            "Stored destination is not a valid header value",
            json!({ "url": destination }),
        )
    })?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::REFERRER_POLICY, HeaderValue::from_static("unsafe-url")),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("referrer always;"),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("private, max-age=90"),
            ),
        ],
    )
        .into_response())
}
