//! Short link entity mapping a code to a destination URL.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// Every link owns exactly one system-assigned `generated_slug`. A link may
/// additionally be reachable through an operator-chosen `custom_alias`.
/// Neither code is ever reissued, even after the link is soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Creation-ordered identifier assigned by the store.
    pub id: i64,
    pub generated_slug: String,
    pub custom_alias: Option<String>,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The code a short URL for this link should be rendered with.
    ///
    /// Prefers the custom alias when one exists.
    pub fn public_code(&self) -> &str {
        self.custom_alias
            .as_deref()
            .unwrap_or(&self.generated_slug)
    }
}

/// Input data for persisting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub generated_slug: String,
    pub custom_alias: Option<String>,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(custom_alias: Option<&str>, deleted: bool) -> ShortLink {
        ShortLink {
            id: 1,
            generated_slug: "3kTMd".to_string(),
            custom_alias: custom_alias.map(str::to_string),
            destination_url: "https://example.com".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: deleted.then(Utc::now),
        }
    }

    #[test]
    fn test_is_deleted() {
        assert!(!link(None, false).is_deleted());
        assert!(link(None, true).is_deleted());
    }

    #[test]
    fn test_public_code_prefers_alias() {
        assert_eq!(link(None, false).public_code(), "3kTMd");
        assert_eq!(link(Some("custom1"), false).public_code(), "custom1");
    }
}
