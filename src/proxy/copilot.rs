//! GitHub Copilot credential exchange and client identity
//!
//! Copilot routing never forwards the caller's credentials. Instead the
//! configured long-lived token is exchanged for a short-lived bearer token
//! (cached for 20 minutes) and each request carries the fixed set of
//! editor-identity headers the Copilot endpoint expects.

use std::time::Duration;

use anyhow::anyhow;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::proxy::token_cache::TokenCache;

/// Exchanged tokens are reused for this long before a new exchange
const TOKEN_TTL: Duration = Duration::from_secs(20 * 60);

const EDITOR_VERSION: &str = "vscode/1.85.0";
const EDITOR_PLUGIN_VERSION: &str = "copilot-chat/0.11.1";
const COPILOT_USER_AGENT: &str = "GitHubCopilotChat/0.11.1";

/// Stable per-process machine identifier: hex SHA-256 of a random UUID,
/// derived once at startup
static MACHINE_ID: Lazy<String> =
    Lazy::new(|| hex::encode(Sha256::digest(Uuid::new_v4().to_string().as_bytes())));

/// Token-exchange response body
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    token: String,
}

/// Copilot authentication state: the long-lived token plus the cache of
/// short-lived tokens exchanged from it
pub struct CopilotAuth {
    client: reqwest::Client,
    token_url: String,
    copilot_token: String,
    cache: TokenCache,
}

impl CopilotAuth {
    pub fn new(client: reqwest::Client, token_url: String, copilot_token: String) -> Self {
        Self {
            client,
            token_url,
            copilot_token,
            cache: TokenCache::new(),
        }
    }

    /// Get a valid short-lived bearer token, exchanging the long-lived one
    /// when the cached token is missing or expired
    pub async fn bearer_token(&self) -> AppResult<String> {
        self.cache
            .get_or_refresh(&self.cache_key(), TOKEN_TTL, || self.exchange())
            .await
    }

    /// Build the full outbound header set for one Copilot-routed request,
    /// fetching the bearer token first
    pub async fn request_headers(&self) -> AppResult<HeaderMap> {
        let access_token = self.bearer_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {access_token}"))
                .map_err(|e| AppError::Internal(anyhow!("invalid exchanged token: {e}")))?,
        );
        headers.insert(
            HeaderName::from_static("x-request-id"),
            header_value(Uuid::new_v4().to_string())?,
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static("2023-07-07"),
        );
        headers.insert(
            HeaderName::from_static("vscode-sessionid"),
            header_value(format!(
                "{}{}",
                Uuid::new_v4(),
                chrono::Utc::now().timestamp_millis()
            ))?,
        );
        headers.insert(
            HeaderName::from_static("vscode-machineid"),
            header_value(MACHINE_ID.clone())?,
        );
        headers.insert(
            HeaderName::from_static("editor-version"),
            HeaderValue::from_static(EDITOR_VERSION),
        );
        headers.insert(
            HeaderName::from_static("editor-plugin-version"),
            HeaderValue::from_static(EDITOR_PLUGIN_VERSION),
        );
        headers.insert(
            HeaderName::from_static("openai-organization"),
            HeaderValue::from_static("github-copilot"),
        );
        headers.insert(
            HeaderName::from_static("copilot-integration-id"),
            HeaderValue::from_static("vscode-chat"),
        );
        headers.insert(
            HeaderName::from_static("openai-intent"),
            HeaderValue::from_static("conversation-panel"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(COPILOT_USER_AGENT));
        headers.insert(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("*/*"),
        );

        Ok(headers)
    }

    /// Cache key scoped to provider and credential so rotating the
    /// long-lived token invalidates the slot
    fn cache_key(&self) -> String {
        format!(
            "copilot:{}",
            hex::encode(Sha256::digest(self.copilot_token.as_bytes()))
        )
    }

    /// Exchange the long-lived token for a short-lived one
    async fn exchange(&self) -> AppResult<String> {
        debug!(url = %self.token_url, "Exchanging Copilot token");

        let response = self
            .client
            .get(&self.token_url)
            .header(AUTHORIZATION, format!("token {}", self.copilot_token))
            .header("Editor-Version", EDITOR_VERSION)
            .header("Editor-Plugin-Version", EDITOR_PLUGIN_VERSION)
            .header(USER_AGENT, COPILOT_USER_AGENT)
            .header("Accept", "*/*")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Copilot token exchange request failed");
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "Copilot token exchange failed {status}: {text}"
            )));
        }

        let body: TokenExchangeResponse = response.json().await?;
        Ok(body.token)
    }
}

fn header_value(value: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&value)
        .map_err(|e| AppError::Internal(anyhow!("invalid header value: {e}")))
}
