//! Configuration management for Courier
//!
//! Configuration is loaded from environment variables. Upstream base URLs
//! default to the fixed production endpoints and can be overridden, which is
//! also how the integration tests point the proxy at mock servers.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default OpenAI-compatible endpoint
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
/// GitHub-Copilot-internal chat endpoint
pub const COPILOT_BASE_URL: &str = "https://api.githubcopilot.com";
/// Copilot token-exchange endpoint
pub const COPILOT_TOKEN_URL: &str = "https://api.github.com/copilot_internal/v2/token";
/// Google Generative Language API endpoint
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Custom OpenAI-compatible base URL override
    pub base_url: Option<String>,
    /// Azure OpenAI resource URL; presence switches routing and auth headers
    pub azure_url: Option<String>,
    /// Azure API version, required when Azure routing is active
    pub azure_api_version: Option<String>,
    /// OpenAI organization id, forwarded when set
    pub openai_org_id: Option<String>,

    /// Model availability overrides, e.g. "-gpt-4,+gpt-3.5-turbo"
    pub custom_models: Option<String>,

    /// Long-lived Copilot token; enables Copilot routing when no base/Azure
    /// URL is configured
    pub copilot_token: Option<String>,
    /// Google API key for the Gemini adapter
    pub google_api_key: Option<String>,

    /// Access codes accepted on the Gemini path; empty set means open access
    pub access_codes: HashSet<String>,

    /// Default upstream endpoint
    pub openai_api_url: String,
    /// Copilot chat endpoint
    pub copilot_api_url: String,
    /// Copilot token-exchange endpoint
    pub copilot_token_url: String,
    /// Gemini endpoint
    pub gemini_api_url: String,

    /// Wall-clock limit for a single upstream call (seconds)
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("COURIER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("COURIER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid COURIER_PORT")?,

            base_url: env::var("BASE_URL").ok().filter(|v| !v.is_empty()),
            azure_url: env::var("AZURE_URL").ok().filter(|v| !v.is_empty()),
            azure_api_version: env::var("AZURE_API_VERSION").ok().filter(|v| !v.is_empty()),
            openai_org_id: env::var("OPENAI_ORG_ID").ok().filter(|v| !v.is_empty()),

            custom_models: env::var("CUSTOM_MODELS").ok().filter(|v| !v.is_empty()),

            copilot_token: env::var("COPILOT_TOKEN").ok().filter(|v| !v.is_empty()),
            google_api_key: env::var("GOOGLE_API_KEY").ok().filter(|v| !v.is_empty()),

            access_codes: env::var("ACCESS_CODES")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),

            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| OPENAI_BASE_URL.to_string()),
            copilot_api_url: env::var("COPILOT_API_URL")
                .unwrap_or_else(|_| COPILOT_BASE_URL.to_string()),
            copilot_token_url: env::var("COPILOT_TOKEN_URL")
                .unwrap_or_else(|_| COPILOT_TOKEN_URL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| GEMINI_BASE_URL.to_string()),

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECS")?,
        })
    }

    /// Whether requests are routed to Azure OpenAI
    pub fn is_azure(&self) -> bool {
        self.azure_url.is_some()
    }

    /// Upstream call timeout
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
