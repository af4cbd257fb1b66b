//! Matrix `.well-known` discovery documents.

use serde::Serialize;

/// Body of `/.well-known/matrix/server`.
#[derive(Debug, Serialize)]
pub struct ServerDiscovery {
    #[serde(rename = "m.server")]
    pub server: String,
}

/// Body of `/.well-known/matrix/client`.
#[derive(Debug, Serialize)]
pub struct ClientDiscovery {
    #[serde(rename = "m.homeserver")]
    pub homeserver: Homeserver,
}

#[derive(Debug, Serialize)]
pub struct Homeserver {
    pub base_url: String,
}

impl ServerDiscovery {
    pub fn for_host(federation_host: &str) -> Self {
        Self {
            server: format!("{federation_host}:443"),
        }
    }
}

impl ClientDiscovery {
    pub fn for_host(federation_host: &str) -> Self {
        Self {
            homeserver: Homeserver {
                base_url: format!("https://{federation_host}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discovery_documents() {
        let server = serde_json::to_value(ServerDiscovery::for_host("matrix.ramsey.dev")).unwrap();
        assert_eq!(server, json!({ "m.server": "matrix.ramsey.dev:443" }));

        let client = serde_json::to_value(ClientDiscovery::for_host("matrix.ramsey.dev")).unwrap();
        assert_eq!(
            client,
            json!({ "m.homeserver": { "base_url": "https://matrix.ramsey.dev" } })
        );
    }
}
