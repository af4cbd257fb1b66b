//! Request host and scheme extraction from HTTP request parts.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};

const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Extracts the lower-cased host name a request was addressed to.
///
/// Looks at, in order:
/// - `X-Forwarded-Host` (first entry) when `behind_proxy` is set
/// - the `Host` header
/// - the authority of the request URI (HTTP/2 requests carry no `Host`)
///
/// Port numbers are stripped; IPv6 literals keep their brackets.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no host is present or the header value
/// is not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "WWW.Example.com:8080".parse().unwrap());
///
/// let host = extract_host(&headers, &Uri::from_static("/"), false).unwrap();
/// assert_eq!(host, "www.example.com");
/// ```
pub fn extract_host(
    headers: &HeaderMap,
    uri: &Uri,
    behind_proxy: bool,
) -> Result<String, AppError> {
    let forwarded = if behind_proxy {
        headers.get(X_FORWARDED_HOST)
    } else {
        None
    };

    let raw = match forwarded.or_else(|| headers.get(header::HOST)) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => uri
            .authority()
            .map(|a| a.as_str().to_string())
            .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?,
    };

    if raw.is_empty() {
        return Err(AppError::bad_request(
            "Missing Host header",
            serde_json::json!({}),
        ));
    }

    Ok(strip_port(&raw).to_ascii_lowercase())
}

/// Returns the scheme the client used: `http` or `https`.
///
/// Trusts `X-Forwarded-Proto` only when `behind_proxy` is set, then falls back
/// to an absolute request URI and finally to `https`.
pub fn extract_scheme(headers: &HeaderMap, uri: &Uri, behind_proxy: bool) -> &'static str {
    let forwarded = behind_proxy
        .then(|| headers.get(X_FORWARDED_PROTO))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or_default().trim().to_ascii_lowercase());

    match forwarded.as_deref().or_else(|| uri.scheme_str()) {
        Some("http") => "http",
        _ => "https",
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 address (e.g., [::1] or [::1]:8080)
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
