//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod error_page;
pub mod health;
pub mod short_link;
pub mod well_known;

pub use error_page::{not_found_handler, render_error_page};
pub use health::health_handler;
pub use short_link::short_link_handler;
pub use well_known::{matrix_client_handler, matrix_server_handler, robots_handler};
