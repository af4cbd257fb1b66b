mod common;

use axum::http::StatusCode;
use common::{get_on, make_server};
use site_edge::config::AppEnv;

#[tokio::test]
async fn test_health_ok() {
    let (server, _) = make_server(AppEnv::Production);

    let response = get_on(&server, "ben.ramsey.dev", "/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_store_down() {
    let (server, repo) = make_server(AppEnv::Production);
    repo.set_unavailable(true);

    let response = get_on(&server, "ben.ramsey.dev", "/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
