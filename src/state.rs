//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::ShortLinkService;
use crate::config::AppEnv;
use crate::domain::routing::RoutingPolicy;

/// State cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub short_link_service: Arc<ShortLinkService>,
    pub policy: Arc<RoutingPolicy>,
    pub app_env: AppEnv,
    /// Trust `X-Forwarded-Host` and `X-Forwarded-Proto`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        short_link_service: Arc<ShortLinkService>,
        policy: Arc<RoutingPolicy>,
        app_env: AppEnv,
        behind_proxy: bool,
    ) -> Self {
        Self {
            short_link_service,
            policy,
            app_env,
            behind_proxy,
        }
    }
}
