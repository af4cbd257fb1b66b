//! JSON body of `GET /health`.

use serde::Serialize;

/// `healthy` when the short link store answers a ping, `degraded` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Crate version the process was built from.
    pub version: String,
    pub checks: HealthChecks,
}

/// Only the store is checked; routing itself needs no backing service.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Outcome of one check: `ok` or `error`, with an optional detail line.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
