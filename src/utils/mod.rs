//! Utility functions for code generation and request handling.
//!
//! - [`short_code`] - Base62 codec, random code generation and alias validation
//! - [`extract_host`] - Host and scheme extraction from HTTP requests
//! - [`db_error`] - SQLx error classification

pub mod db_error;
pub mod extract_host;
pub mod short_code;
