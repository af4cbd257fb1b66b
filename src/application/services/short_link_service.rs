//! Short link creation, code generation and resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SiteConfig;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError, UniqueKey};
use crate::domain::routing::short_link_code;
use crate::error::AppError;
use crate::utils::short_code::{generate_code, validate_custom_alias};

/// Upper bound on random draws (and insert retries) per created link.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Generated slugs are unique across every row ever stored, soft-deleted rows
/// included, so a code once issued is never handed out again.
pub struct ShortLinkService {
    repository: Arc<dyn ShortLinkRepository>,
    short_link_host: String,
    base_url: String,
}

impl ShortLinkService {
    /// Creates a new short link service bound to the configured short-link host.
    pub fn new(repository: Arc<dyn ShortLinkRepository>, site: &SiteConfig) -> Self {
        Self {
            repository,
            short_link_host: site.short_link_host.clone(),
            base_url: site.short_link_base_url.clone(),
        }
    }

    /// Creates a short link to `destination_url`.
    ///
    /// A generated slug is always assigned. A `custom_alias`, when given, is an
    /// additional code for the same link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `destination_url` is not an absolute http(s) URL
    /// - `custom_alias` contains characters outside `[A-Za-z0-9-_.]`
    ///
    /// Returns [`AppError::Conflict`] if the alias belongs to any stored link,
    /// active or soft-deleted.
    ///
    /// Returns [`AppError::StoreUnavailable`] if no free code was found within
    /// [`MAX_CODE_ATTEMPTS`] or the store fails.
    #[instrument(skip(self))]
    pub async fn create_short_link(
        &self,
        destination_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        validate_destination(destination_url)?;

        if let Some(alias) = custom_alias {
            validate_custom_alias(alias)?;

            if self
                .repository
                .find_by_custom_alias(alias, true)
                .await?
                .is_some()
            {
                return Err(alias_taken(alias));
            }
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let generated_slug = self.generate_unique_code().await?;

            let new_link = NewShortLink {
                generated_slug: generated_slug.clone(),
                custom_alias: custom_alias.map(str::to_string),
                destination_url: destination_url.to_string(),
                created_at: Utc::now(),
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    info!(id = link.id, code = %link.generated_slug, "Created short link");
                    return Ok(link);
                }
                // Another writer took the slug between the check and the insert.
                Err(StoreError::Duplicate(UniqueKey::GeneratedSlug)) => {
                    warn!(attempt, code = %generated_slug, "Generated slug taken at insert");
                }
                Err(StoreError::Duplicate(UniqueKey::CustomAlias)) => {
                    return Err(alias_taken(custom_alias.unwrap_or_default()));
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(attempts = MAX_CODE_ATTEMPTS, "Gave up inserting short link");
        Err(AppError::store_unavailable(
            "Failed to store short link",
            json!({ "reason": "Too many slug collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Draws random codes until one is unused by every stored link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] after [`MAX_CODE_ATTEMPTS`]
    /// collisions, or when the store fails.
    #[instrument(skip(self))]
    pub async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code()?;

            if self
                .repository
                .find_by_generated_slug(&code, true)
                .await?
                .is_none()
            {
                return Ok(code);
            }

            warn!(attempt, code = %code, "Generated code collides with an existing link");
        }

        error!(attempts = MAX_CODE_ATTEMPTS, "Exhausted code generation attempts");
        Err(AppError::store_unavailable(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves an inbound short-link request to an active link.
    ///
    /// `path_or_url` is either a request path (checked against `request_host`)
    /// or an absolute URL (checked against its own host). The code is the path
    /// with a leading `/su/` or `/` removed, matched first as a custom alias and
    /// then as a generated slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the host is not the short-link host,
    /// the path holds no code, or no active link answers to the code.
    #[instrument(skip(self))]
    pub async fn resolve(&self, request_host: &str, path_or_url: &str) -> Result<ShortLink, AppError> {
        let (host, path) = match Url::parse(path_or_url) {
            Ok(url) if url.has_host() => (
                url.host_str().unwrap_or_default().to_ascii_lowercase(),
                url.path().to_string(),
            ),
            _ => (request_host.to_ascii_lowercase(), path_or_url.to_string()),
        };

        if host != self.short_link_host {
            debug!(%host, "Short link requested on foreign host");
            return Err(link_not_found(&path));
        }

        let Some(code) = short_link_code(&path) else {
            return Err(link_not_found(&path));
        };

        self.find_by_code(code, false)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Looks a code up as a custom alias first, then as a generated slug.
    #[instrument(skip(self))]
    pub async fn find_by_code(
        &self,
        code: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, AppError> {
        if let Some(link) = self
            .repository
            .find_by_custom_alias(code, include_deleted)
            .await?
        {
            return Ok(Some(link));
        }

        Ok(self
            .repository
            .find_by_generated_slug(code, include_deleted)
            .await?)
    }

    /// Soft-deletes the active link answering to `code`.
    ///
    /// The link's codes stay reserved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link answers to `code`.
    #[instrument(skip(self))]
    pub async fn delete_short_link(&self, code: &str) -> Result<ShortLink, AppError> {
        let mut link = self
            .find_by_code(code, false)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        if !self.repository.soft_delete(link.id).await? {
            return Err(link_not_found(code));
        }

        let now = Utc::now();
        link.deleted_at = Some(now);
        link.updated_at = Some(now);
        info!(id = link.id, code, "Soft-deleted short link");

        Ok(link)
    }

    /// Renders the public short URL of a link.
    pub fn short_url(&self, link: &ShortLink) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            link.public_code()
        )
    }

    /// Checks that the backing store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}

fn validate_destination(destination_url: &str) -> Result<(), AppError> {
    let invalid = || {
        AppError::bad_request(
            format!("Invalid destination URL: {destination_url}"),
            json!({ "url": destination_url }),
        )
    };

    let url = Url::parse(destination_url).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(invalid());
    }

    Ok(())
}

fn alias_taken(alias: &str) -> AppError {
    AppError::conflict(
        format!("Custom slug already taken: {alias}"),
        json!({ "alias": alias }),
    )
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
