//! Path sets recognised by the routing policy.
//!
//! Comparisons are exact and case-sensitive.

/// Paths every host may serve.
pub const ALWAYS_ALLOWED: &[&str] = &["/health", "/robots.txt"];

pub const MATRIX_CLIENT: &str = "/.well-known/matrix/client";
pub const MATRIX_SERVER: &str = "/.well-known/matrix/server";
pub const WEBFINGER: &str = "/.well-known/webfinger";
pub const KEYBASE_PROOF: &str = "/.well-known/keybase.txt";

/// Path roots owned by the Matrix homeserver.
pub const FEDERATION_ROOTS: &[&str] = &["/_matrix", "/_synapse"];

const KEY_DIRECTORY_ROOT: &str = "/.well-known/openpgpkey/";

pub fn is_always_allowed(path: &str) -> bool {
    ALWAYS_ALLOWED.contains(&path)
}

/// `/_matrix`, `/_matrix/...`, `/_synapse`, `/_synapse/...`.
pub fn is_federation_path(path: &str) -> bool {
    FEDERATION_ROOTS.iter().any(|root| {
        path.strip_prefix(root)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// OpenPGP Web Key Directory paths.
///
/// The direct form is `/.well-known/openpgpkey/policy` or
/// `/.well-known/openpgpkey/hu/{id}`. When `domain` is given, the advanced
/// form with the domain as an extra segment
/// (`/.well-known/openpgpkey/{domain}/hu/{id}`) is accepted as well.
pub fn is_key_directory_path(path: &str, domain: Option<&str>) -> bool {
    let Some(rest) = path.strip_prefix(KEY_DIRECTORY_ROOT) else {
        return false;
    };

    if is_key_directory_leaf(rest) {
        return true;
    }

    domain
        .and_then(|d| rest.strip_prefix(d))
        .and_then(|r| r.strip_prefix('/'))
        .is_some_and(is_key_directory_leaf)
}

fn is_key_directory_leaf(rest: &str) -> bool {
    if rest == "policy" {
        return true;
    }

    rest.strip_prefix("hu/")
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric()))
}

/// Well-known paths the secondary domain serves itself.
pub fn is_secondary_well_known(path: &str) -> bool {
    path == MATRIX_CLIENT
        || path == MATRIX_SERVER
        || path == WEBFINGER
        || is_key_directory_path(path, None)
}

/// Well-known paths the legacy domain still serves.
pub fn is_legacy_well_known(path: &str) -> bool {
    path == KEYBASE_PROOF || path == WEBFINGER || is_key_directory_path(path, None)
}
