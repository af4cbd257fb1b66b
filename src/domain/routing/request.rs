//! Normalised view of an inbound request used by the routing pipeline.

/// The parts of a request the routing policy looks at.
///
/// `host` is lower-cased and stripped of any port; `path` and `query` are
/// kept exactly as received. An empty query (`/about?`) is kept as `Some("")`
/// so redirects reproduce the bare `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
}

impl RequestTarget {
    pub fn new(
        scheme: impl Into<String>,
        host: impl AsRef<str>,
        path: impl Into<String>,
        query: Option<&str>,
    ) -> Self {
        let path = path.into();
        Self {
            scheme: scheme.into(),
            host: host.as_ref().to_ascii_lowercase(),
            path: if path.is_empty() { "/".to_string() } else { path },
            query: query.map(str::to_string),
        }
    }

    /// Builds `scheme://host` + path + `?query` for a redirect.
    pub fn location_on(&self, scheme: &str, host: &str) -> String {
        match &self.query {
            Some(query) => format!("{scheme}://{host}{}?{query}", self.path),
            None => format!("{scheme}://{host}{}", self.path),
        }
    }
}
