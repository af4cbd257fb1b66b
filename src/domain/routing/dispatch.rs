//! First pipeline stage: recognise which handler owns a request.

use crate::config::SiteConfig;
use crate::domain::routing::RequestTarget;

/// Prefix of the legacy short-link path form `/su/{code}`.
pub const SHORT_LINK_PATH_PREFIX: &str = "/su/";

/// Handler a request was recognised as belonging to before policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchHint {
    #[default]
    Unmatched,
    ShortLink,
}

/// Recognises short-link requests: the short-link host with a path of
/// `/{code}` or `/su/{code}`, where `{code}` is one non-empty segment.
pub fn dispatch(target: &RequestTarget, site: &SiteConfig) -> DispatchHint {
    if target.host != site.short_link_host {
        return DispatchHint::Unmatched;
    }

    if short_link_code(&target.path).is_some() {
        DispatchHint::ShortLink
    } else {
        DispatchHint::Unmatched
    }
}

/// Extracts the candidate code from a short-link path.
///
/// Strips a leading `/su/` if present, otherwise a single leading `/`.
/// Returns `None` when what remains is empty or spans more than one segment.
pub fn short_link_code(path: &str) -> Option<&str> {
    let code = path
        .strip_prefix(SHORT_LINK_PATH_PREFIX)
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path);

    if code.is_empty() || code.contains('/') {
        None
    } else {
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(host: &str, path: &str) -> RequestTarget {
        RequestTarget::new("https", host, path, None)
    }

    #[test]
    fn test_short_link_code_stripping() {
        assert_eq!(short_link_code("/abc"), Some("abc"));
        assert_eq!(short_link_code("/su/abc"), Some("abc"));
        assert_eq!(short_link_code("abc"), Some("abc"));
        assert_eq!(short_link_code("/su"), Some("su"));
        assert_eq!(short_link_code("/su/"), None);
        assert_eq!(short_link_code("/"), None);
        assert_eq!(short_link_code("/a/b"), None);
        assert_eq!(short_link_code("/su/a/b"), None);
    }

    #[test]
    fn test_dispatch_short_link_host() {
        let site = SiteConfig::default();
        assert_eq!(dispatch(&target("bram.se", "/custom1"), &site), DispatchHint::ShortLink);
        assert_eq!(dispatch(&target("BRAM.SE", "/su/x1"), &site), DispatchHint::ShortLink);
    }

    #[test]
    fn test_dispatch_unmatched() {
        let site = SiteConfig::default();
        assert_eq!(dispatch(&target("bram.se", "/"), &site), DispatchHint::Unmatched);
        assert_eq!(dispatch(&target("bram.se", "/a/b"), &site), DispatchHint::Unmatched);
        assert_eq!(
            dispatch(&target("ben.ramsey.dev", "/custom1"), &site),
            DispatchHint::Unmatched
        );
    }
}
