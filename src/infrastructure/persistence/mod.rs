//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - Short link storage, lookup and soft deletion

pub mod pg_short_link_repository;

pub use pg_short_link_repository::PgShortLinkRepository;
