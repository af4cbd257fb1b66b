//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::instrument;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};
use crate::utils::db_error::store_error;

const COLUMNS: &str =
    "id, generated_slug, custom_alias, destination_url, created_at, updated_at, deleted_at";

#[derive(FromRow)]
struct ShortLinkRow {
    id: i64,
    generated_slug: String,
    custom_alias: Option<String>,
    destination_url: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            generated_slug: row.generated_slug,
            custom_alias: row.custom_alias,
            destination_url: row.destination_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Rows are never removed; deletion stamps `deleted_at`, so unique constraints
/// keep reserving the codes of deleted links.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_by_column(
        &self,
        column: &'static str,
        value: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM short_links \
             WHERE {column} = $1 AND ($2 OR deleted_at IS NULL)"
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(value)
            .bind(include_deleted)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(store_error)?;

        Ok(row.map(ShortLink::from))
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    #[instrument(skip(self, new_link), fields(slug = %new_link.generated_slug))]
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let sql = format!(
            "INSERT INTO short_links (generated_slug, custom_alias, destination_url, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(&new_link.generated_slug)
            .bind(&new_link.custom_alias)
            .bind(&new_link.destination_url)
            .bind(new_link.created_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(store_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_generated_slug(
        &self,
        slug: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.find_by_column("generated_slug", slug, include_deleted)
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_custom_alias(
        &self,
        alias: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.find_by_column("custom_alias", alias, include_deleted)
            .await
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE short_links SET deleted_at = now(), updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(store_error)?;

        Ok(())
    }
}
