//! HTTP middleware for request processing.
//!
//! Provides host routing and observability middleware.

pub mod routing;
pub mod tracing;
