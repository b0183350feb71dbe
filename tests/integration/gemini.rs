//! Gemini adapter integration tests
//!
//! Covers the preflight short-circuit, access-code auth, body translation
//! into Gemini's content/role schema, and the allow-list check on this path.

use axum::http::{header, Method};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::{base_config, test_server};
use crate::mocks::upstream::MockUpstream;

fn gemini_config(upstream: &MockUpstream) -> courier::Config {
    let mut config = base_config();
    config.google_api_key = Some("g-key".to_string());
    config.gemini_api_url = upstream.uri();
    config
}

#[tokio::test]
async fn options_preflight_short_circuits_before_auth() {
    let upstream = MockUpstream::start().await;
    let mut config = gemini_config(&upstream);
    config.access_codes = ["secret".to_string()].into_iter().collect();
    let server = test_server(config);

    let response = server
        .method(Method::OPTIONS, "/api/gemini/v1/chat/completions")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "body": "OK" }));
}

#[tokio::test]
async fn missing_access_code_rejected_with_401() {
    let upstream = MockUpstream::start().await;
    let mut config = gemini_config(&upstream);
    config.access_codes = ["secret".to_string()].into_iter().collect();
    let server = test_server(config);

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": true, "msg": "empty access code" }));
}

#[tokio::test]
async fn wrong_access_code_rejected_with_401() {
    let upstream = MockUpstream::start().await;
    let mut config = gemini_config(&upstream);
    config.access_codes = ["secret".to_string()].into_iter().collect();
    let server = test_server(config);

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .add_header(header::AUTHORIZATION, "Bearer nope".parse().unwrap())
        .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": true, "msg": "wrong access code" }));
}

#[tokio::test]
async fn translates_openai_body_into_gemini_turns() {
    let upstream = MockUpstream::start().await;
    upstream.mock_gemini_generate("g-key").await;
    let server = test_server(gemini_config(&upstream));

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .json(&json!({
            "model": "gemini-pro",
            "messages": [
                { "role": "system", "content": "a" },
                { "role": "user", "content": "b" },
                { "role": "assistant", "content": "c" },
                { "role": "user", "content": "d" },
                { "role": "user", "content": "e" }
            ],
            "temperature": 0.5,
            "top_p": 0.9,
            "presence_penalty": 1.5,
            "stream": true
        }))
        .await;

    assert_eq!(response.status_code(), 200);

    let requests = upstream.received_requests().await;
    assert_eq!(requests.len(), 1);

    let forwarded: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        forwarded["contents"],
        json!([
            { "role": "user", "parts": [{ "text": "a" }, { "text": "b" }] },
            { "role": "model", "parts": [{ "text": "c" }] },
            { "role": "user", "parts": [{ "text": "d" }, { "text": "e" }] }
        ])
    );
    assert_eq!(forwarded["generationConfig"]["temperature"], 0.5);
    assert_eq!(forwarded["generationConfig"]["topP"], 0.9);
    assert!(forwarded["generationConfig"]
        .get("presence_penalty")
        .is_none());
}

#[tokio::test]
async fn gemini_response_headers_are_scrubbed() {
    let upstream = MockUpstream::start().await;
    upstream.mock_gemini_generate("g-key").await;
    let server = test_server(gemini_config(&upstream));

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
        .await;

    assert_eq!(response.status_code(), 200);
    let headers = response.headers();
    assert!(headers.get("www-authenticate").is_none());
    assert_eq!(headers.get("x-accel-buffering").unwrap(), "no");
}

#[tokio::test]
async fn disabled_model_is_refused_on_gemini_path() {
    let upstream = MockUpstream::start().await;
    upstream.mock_gemini_generate("g-key").await;
    let mut config = gemini_config(&upstream);
    config.custom_models = Some("-gemini-pro".to_string());
    let server = test_server(config);

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .json(&json!({
            "model": "gemini-pro",
            "messages": [{ "role": "user", "content": "hi" }]
        }))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": true, "message": "you are not allowed to use gemini-pro model" })
    );
    assert!(upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn missing_google_api_key_reports_config_error() {
    let upstream = MockUpstream::start().await;
    let mut config = gemini_config(&upstream);
    config.google_api_key = None;
    let server = test_server(config);

    let response = server
        .post("/api/gemini/v1/chat/completions")
        .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "missing GOOGLE_API_KEY in server env vars");
}
