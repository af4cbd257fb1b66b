//! Core domain entities.
//!
//! Entities are plain data structures; creation input lives in a separate
//! `New*` struct so that store-assigned fields (`id`) never appear in it.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
