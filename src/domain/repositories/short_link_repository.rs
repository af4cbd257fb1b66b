//! Repository trait for short link persistence.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::entities::{NewShortLink, ShortLink};

/// Unique keys enforced independently by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    GeneratedSlug,
    CustomAlias,
}

impl UniqueKey {
    /// Name of the backing database constraint.
    pub fn constraint(self) -> &'static str {
        match self {
            UniqueKey::GeneratedSlug => "short_links_generated_slug_key",
            UniqueKey::CustomAlias => "short_links_custom_alias_key",
        }
    }

    /// Maps a database constraint name back to the key it protects.
    pub fn from_constraint(name: &str) -> Option<Self> {
        match name {
            "short_links_generated_slug_key" => Some(UniqueKey::GeneratedSlug),
            "short_links_custom_alias_key" => Some(UniqueKey::CustomAlias),
            _ => None,
        }
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UniqueKey::GeneratedSlug => "generated slug",
            UniqueKey::CustomAlias => "custom alias",
        })
    }
}

/// Failures reported by a [`ShortLinkRepository`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// An insert lost against an existing row holding the same unique key.
    #[error("duplicate {0}")]
    Duplicate(UniqueKey),
    /// The store could not be reached or the statement failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key space of short links.
///
/// Rows are addressable both by generated slug and by custom alias. Lookups
/// take an `include_deleted` flag: resolution passes `false`, uniqueness
/// checks pass `true` so that soft-deleted codes are never reissued.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Persists a new short link and returns it with its assigned `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] naming the violated key when either
    /// the generated slug or the custom alias already exists, deleted or not.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Finds a link by its generated slug (exact, case-sensitive match).
    async fn find_by_generated_slug(
        &self,
        code: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link by its custom alias (exact, case-sensitive match).
    async fn find_by_custom_alias(
        &self,
        code: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError>;

    /// Sets `deleted_at` on an active link.
    ///
    /// Returns `Ok(false)` if no active link has this `id`.
    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Round-trips to the store; used by health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
