//! Integration tests
//!
//! Shared helpers for building a test server around a hand-rolled `Config`.

pub mod gemini;
pub mod health;

use std::collections::HashSet;
use std::sync::Arc;

use axum_test::TestServer;

use courier::{config::Config, routes::create_router, AppState};

/// A config with nothing configured: requests fall through to the default
/// endpoint. Tests override individual fields.
pub fn base_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: None,
        azure_url: None,
        azure_api_version: None,
        openai_org_id: None,
        custom_models: None,
        copilot_token: None,
        google_api_key: None,
        access_codes: HashSet::new(),
        openai_api_url: "https://api.openai.com".to_string(),
        copilot_api_url: "https://api.githubcopilot.com".to_string(),
        copilot_token_url: "https://api.github.com/copilot_internal/v2/token".to_string(),
        gemini_api_url: "https://generativelanguage.googleapis.com".to_string(),
        upstream_timeout_secs: 600,
    }
}

/// Build a test server over the full router
pub fn test_server(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}
