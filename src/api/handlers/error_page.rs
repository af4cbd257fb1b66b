//! Static HTML error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::routing::ErrorPage;

/// Template for error pages.
///
/// Renders `templates/error.html`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    code: u16,
    title: &'static str,
    message: &'static str,
}

/// Renders `page` with its status code.
pub fn render_error_page(page: ErrorPage) -> Response {
    let (status, message) = match page {
        ErrorPage::NotFound => (
            StatusCode::NOT_FOUND,
            "The page you requested does not exist.",
        ),
        ErrorPage::Forbidden => (
            StatusCode::FORBIDDEN,
            "You do not have access to this resource.",
        ),
    };

    let template = ErrorTemplate {
        code: page.code(),
        title: page.title(),
        message,
    };

    (status, template).into_response()
}

/// Fallback for requests no route answers.
pub async fn not_found_handler() -> Response {
    render_error_page(ErrorPage::NotFound)
}
