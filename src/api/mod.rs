//! HTTP layer for request/response handling.
//!
//! Translates HTTP requests into routing decisions and short-link
//! resolutions, and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for JSON responses
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Host routing and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
