//! Upstream routing decisions
//!
//! Resolves which provider base URL a request goes to, strips the inbound
//! proxy prefix from the path, and maps paths into Azure's versioned shape.
//! Precedence is Copilot > Azure > custom base URL > provider default.

use crate::config::Config;

/// Inbound prefix stripped for Copilot-routed requests
const COPILOT_INBOUND_PREFIX: &str = "/api/openai/v1/";
/// Inbound prefix stripped for all other routes
const OPENAI_INBOUND_PREFIX: &str = "/api/openai/";

/// Copilot routing is a fallback: it applies only when a Copilot token is
/// configured and no explicit Azure or base URL override exists.
pub fn uses_copilot(config: &Config) -> bool {
    config.copilot_token.is_some() && config.azure_url.is_none() && config.base_url.is_none()
}

/// Resolve the upstream base URL for the generic forwarder, normalized
pub fn resolve_base_url(config: &Config) -> String {
    let raw = if uses_copilot(config) {
        &config.copilot_api_url
    } else {
        config
            .azure_url
            .as_ref()
            .or(config.base_url.as_ref())
            .unwrap_or(&config.openai_api_url)
    };

    normalize_base_url(raw)
}

/// Strip the inbound proxy prefix from path+query to get the
/// upstream-relative path. Removes every occurrence, matching the original
/// proxy's behavior.
pub fn strip_inbound_prefix(path_and_query: &str, copilot: bool) -> String {
    let prefix = if copilot {
        COPILOT_INBOUND_PREFIX
    } else {
        OPENAI_INBOUND_PREFIX
    };
    path_and_query.replace(prefix, "")
}

/// Add an `https://` scheme when missing and strip one trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let mut base = if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    if base.ends_with('/') {
        base.pop();
    }

    base
}

/// Rewrite a relative path into Azure's versioned deployment shape
pub fn make_azure_path(path: &str, api_version: &str) -> String {
    let path = path.replace("v1/", "openai/deployments/");
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}api-version={api_version}")
}
