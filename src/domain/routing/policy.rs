//! Host routing policy: pass through, redirect, or forbid.

use crate::config::{AppEnv, SiteConfig};
use crate::domain::routing::paths;
use crate::domain::routing::{DispatchHint, RedirectStatus, RequestTarget, RoutingDecision};

const WWW_PREFIX: &str = "www.";
const KEY_DIRECTORY_PREFIX: &str = "openpgpkey.";

/// Pure decision function over (request, dispatch hint, environment).
///
/// Rules are tried in order and the first match wins:
///
/// 1. development/test environment: pass through
/// 2. always-allowed path (`/health`, `/robots.txt`): pass through
/// 3. request already dispatched to the short-link handler: pass through
/// 4. canonical host: pass through
/// 5. `www.` host: 301 to the same URL without `www.`
/// 6. `openpgpkey.<site domain>`: key directory paths pass, anything else is 403
/// 7. secondary domain: well-known paths pass, federation roots 308 to the
///    federation host, anything else 302 to the canonical host
/// 8. legacy domain: well-known paths pass, anything else 301 to the canonical host
/// 9. any other host: 301 to the canonical host
///
/// Query strings are carried verbatim onto every redirect.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    site: SiteConfig,
}

impl RoutingPolicy {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn evaluate(
        &self,
        target: &RequestTarget,
        hint: DispatchHint,
        env: AppEnv,
    ) -> RoutingDecision {
        if !env.is_production() {
            return RoutingDecision::PassThrough;
        }

        let path = target.path.as_str();
        let host = target.host.as_str();

        if paths::is_always_allowed(path) {
            return RoutingDecision::PassThrough;
        }

        if hint == DispatchHint::ShortLink {
            return RoutingDecision::PassThrough;
        }

        if host == self.site.canonical_host {
            return RoutingDecision::PassThrough;
        }

        if let Some(bare) = host
            .strip_prefix(WWW_PREFIX)
            .filter(|bare| !bare.is_empty())
        {
            return RoutingDecision::redirect(
                target.location_on(&target.scheme, bare),
                RedirectStatus::MovedPermanently,
            );
        }

        if let Some(domain) = self.key_directory_domain(host) {
            return if paths::is_key_directory_path(path, Some(domain)) {
                RoutingDecision::PassThrough
            } else {
                RoutingDecision::forbidden()
            };
        }

        if host == self.site.secondary_domain {
            if paths::is_secondary_well_known(path) {
                return RoutingDecision::PassThrough;
            }
            if paths::is_federation_path(path) {
                return RoutingDecision::redirect(
                    target.location_on("https", &self.site.federation_host),
                    RedirectStatus::PermanentRedirect,
                );
            }
            return self.to_canonical(target, RedirectStatus::Found);
        }

        if host == self.site.legacy_domain {
            if paths::is_legacy_well_known(path) {
                return RoutingDecision::PassThrough;
            }
            return self.to_canonical(target, RedirectStatus::MovedPermanently);
        }

        self.to_canonical(target, RedirectStatus::MovedPermanently)
    }

    fn key_directory_domain<'a>(&'a self, host: &str) -> Option<&'a str> {
        let domain = host.strip_prefix(KEY_DIRECTORY_PREFIX)?;
        self.site
            .key_directory_domains()
            .into_iter()
            .find(|d| *d == domain)
    }

    fn to_canonical(&self, target: &RequestTarget, status: RedirectStatus) -> RoutingDecision {
        RoutingDecision::redirect(
            target.location_on("https", &self.site.canonical_host),
            status,
        )
    }
}
