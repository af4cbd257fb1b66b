//! Application error taxonomy and HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned by JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by services and handlers.
///
/// `Display` renders only the human-readable message; structured context
/// travels in `details`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input was rejected before touching the store.
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// No active record matches the request.
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// A unique key (custom alias or generated slug) is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    /// The persistent store could not complete the operation.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable identifier used in JSON bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::StoreUnavailable { .. } => "store_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::StoreUnavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(key) => AppError::conflict(
                format!("Duplicate {key}"),
                json!({ "constraint": key.constraint() }),
            ),
            StoreError::Unavailable(reason) => AppError::store_unavailable(
                "Short link store unavailable",
                json!({ "reason": reason }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::UniqueKey;

    #[test]
    fn test_display_is_message() {
        let err = AppError::bad_request("Invalid custom slug: bad slug", json!({}));
        assert_eq!(err.to_string(), "Invalid custom slug: bad slug");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::Duplicate(UniqueKey::CustomAlias).into();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: AppError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
