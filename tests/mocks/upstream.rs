//! Wiremock-based upstream providers
//!
//! One wrapper per upstream the proxy can talk to: an OpenAI-compatible chat
//! endpoint (also reused for Azure paths), the Copilot token-exchange and
//! chat endpoints, and the Gemini streaming generation endpoint.

use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// A mock upstream provider server
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Requests the server has received so far
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Mock a successful chat completion at the given path.
    ///
    /// The response deliberately carries a `www-authenticate` header and an
    /// upstream `X-Accel-Buffering: yes` so tests can assert the scrub.
    pub async fn mock_chat_completion(&self, at_path: &str) {
        Mock::given(method("POST"))
            .and(path(at_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Self::chat_completion_body())
                    .insert_header("www-authenticate", "Basic realm=\"upstream\"")
                    .insert_header("X-Accel-Buffering", "yes")
                    .insert_header("X-Upstream-Marker", "present"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock the Copilot token-exchange endpoint, expecting exactly
    /// `expected_calls` exchanges
    pub async fn mock_copilot_token_exchange(&self, token: &str, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/copilot_internal/v2/token"))
            .and(header("Authorization", "token ghu_long_lived"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    /// Mock the Copilot chat endpoint, requiring the exchanged bearer token
    /// and the conversation-panel intent header
    pub async fn mock_copilot_chat(&self, bearer: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", format!("Bearer {bearer}").as_str()))
            .and(header("Openai-Intent", "conversation-panel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::chat_completion_body()))
            .mount(&self.server)
            .await;
    }

    /// Mock the Gemini streaming generation endpoint for the given API key
    pub async fn mock_gemini_generate(&self, api_key: &str) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:streamGenerateContent"))
            .and(query_param("key", api_key))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{ "text": "Hello from Gemini" }]
                        }
                    }]
                }
            ])))
            .mount(&self.server)
            .await;
    }

    fn chat_completion_body() -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1706745600,
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
        })
    }
}
