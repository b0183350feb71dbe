//! Courier - stateless LLM relay proxy
//!
//! This library provides the core functionality for the Courier proxy
//! server. It forwards chat-completion requests to OpenAI-compatible, Azure,
//! GitHub Copilot and Gemini backends, rewriting paths, injecting
//! provider-specific auth headers, and translating request bodies where a
//! provider needs its native schema.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod proxy;
pub mod routes;
pub mod translate;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::{CopilotAuth, TokenCache};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Copilot credential exchange, present when a Copilot token is configured
    pub copilot: Option<Arc<CopilotAuth>>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Upstream redirects are surfaced to the caller as-is, never followed
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let copilot = config.copilot_token.as_ref().map(|token| {
            Arc::new(CopilotAuth::new(
                http_client.clone(),
                config.copilot_token_url.clone(),
                token.clone(),
            ))
        });

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            copilot,
        })
    }
}
