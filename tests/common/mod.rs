#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, header};
use axum_test::{TestRequest, TestServer};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use site_edge::application::services::ShortLinkService;
use site_edge::config::{AppEnv, SiteConfig};
use site_edge::domain::entities::{NewShortLink, ShortLink};
use site_edge::domain::repositories::{ShortLinkRepository, StoreError, UniqueKey};
use site_edge::domain::routing::RoutingPolicy;
use site_edge::routes::app_router;
use site_edge::state::AppState;

/// Short link store kept in memory, with the same uniqueness rules as the
/// PostgreSQL table: codes of soft-deleted rows stay taken.
#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    links: Mutex<Vec<ShortLink>>,
    unavailable: AtomicBool,
}

impl InMemoryShortLinkRepository {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn seed(&self, slug: &str, alias: Option<&str>, url: &str, deleted: bool) -> ShortLink {
        let mut links = self.links.lock().unwrap();
        let link = ShortLink {
            id: links.len() as i64 + 1,
            generated_slug: slug.to_string(),
            custom_alias: alias.map(str::to_string),
            destination_url: url.to_string(),
            created_at: Utc::now(),
            updated_at: deleted.then(Utc::now),
            deleted_at: deleted.then(Utc::now),
        };
        links.push(link.clone());
        link
    }

    pub fn all(&self) -> Vec<ShortLink> {
        self.links.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }

    fn find(
        &self,
        include_deleted: bool,
        matches: impl Fn(&ShortLink) -> bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.check_available()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|link| matches(link) && (include_deleted || !link.is_deleted()))
            .cloned())
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();

        if links
            .iter()
            .any(|l| l.generated_slug == new_link.generated_slug)
        {
            return Err(StoreError::Duplicate(UniqueKey::GeneratedSlug));
        }
        if new_link.custom_alias.is_some()
            && links.iter().any(|l| l.custom_alias == new_link.custom_alias)
        {
            return Err(StoreError::Duplicate(UniqueKey::CustomAlias));
        }

        let link = ShortLink {
            id: links.len() as i64 + 1,
            generated_slug: new_link.generated_slug,
            custom_alias: new_link.custom_alias,
            destination_url: new_link.destination_url,
            created_at: new_link.created_at,
            updated_at: None,
            deleted_at: None,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_generated_slug(
        &self,
        slug: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.find(include_deleted, |l| l.generated_slug == slug)
    }

    async fn find_by_custom_alias(
        &self,
        alias: &str,
        include_deleted: bool,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.find(include_deleted, |l| l.custom_alias.as_deref() == Some(alias))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();

        match links.iter_mut().find(|l| l.id == id && !l.is_deleted()) {
            Some(link) => {
                let now = Utc::now();
                link.deleted_at = Some(now);
                link.updated_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

/// Builds state over an in-memory store with the default site hosts.
///
/// The state trusts forwarded headers so tests can pin the request scheme.
pub fn create_test_state(app_env: AppEnv) -> (AppState, Arc<InMemoryShortLinkRepository>) {
    let site = SiteConfig::default();
    let repository = Arc::new(InMemoryShortLinkRepository::default());

    let short_link_service = Arc::new(ShortLinkService::new(repository.clone(), &site));
    let policy = Arc::new(RoutingPolicy::new(site));

    let state = AppState::new(short_link_service, policy, app_env, true);

    (state, repository)
}

pub fn make_server(app_env: AppEnv) -> (TestServer, Arc<InMemoryShortLinkRepository>) {
    let (state, repository) = create_test_state(app_env);
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repository)
}

/// Sends `GET path` to `host` over https.
pub fn get_on(server: &TestServer, host: &'static str, path: &str) -> TestRequest {
    server
        .get(path)
        .add_header(header::HOST, HeaderValue::from_static(host))
        .add_header(
            HeaderName::from_static("x-forwarded-proto"),
            HeaderValue::from_static("https"),
        )
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
