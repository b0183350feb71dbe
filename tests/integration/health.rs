//! Health endpoint integration tests

use pretty_assertions::assert_eq;
use serde_json::Value;

use super::{base_config, test_server};

#[tokio::test]
async fn health_reports_version_and_uptime() {
    let server = test_server(base_config());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn liveness_probe_is_ok() {
    let server = test_server(base_config());

    let response = server.get("/health/live").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}
