//! Header construction and scrubbing for relayed requests
//!
//! Builds the outbound header set for the default/Azure routes and sanitizes
//! upstream response headers before they are returned to the caller.

use axum::http::header::{self, HeaderName};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};

/// Azure expects the caller credential under this name instead of
/// `Authorization`
pub const AZURE_API_KEY_HEADER: &str = "api-key";

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");
const OPENAI_ORGANIZATION: HeaderName = HeaderName::from_static("openai-organization");

/// Hop-by-hop headers that must never be forwarded
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Build outbound headers for the default and Azure routes.
///
/// The caller's `Authorization` value passes through, renamed to `api-key`
/// when Azure routing is active. The organization header is added only when
/// an org id is configured.
pub fn build_relay_headers(
    incoming: &HeaderMap,
    is_azure: bool,
    org_id: Option<&str>,
) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    if let Some(auth_value) = incoming.get(AUTHORIZATION) {
        let auth_name = if is_azure {
            HeaderName::from_static(AZURE_API_KEY_HEADER)
        } else {
            AUTHORIZATION
        };
        headers.insert(auth_name, auth_value.clone());
    }

    if let Some(org_id) = org_id {
        if let Ok(value) = HeaderValue::from_str(org_id) {
            headers.insert(OPENAI_ORGANIZATION, value);
        }
    }

    headers
}

/// Check if a header is a hop-by-hop header that should not be forwarded
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
}

/// Sanitize upstream response headers before relaying them to the caller.
///
/// `www-authenticate` is removed so browsers never show a credential prompt
/// for upstream 401s, and `X-Accel-Buffering: no` is forced so intermediaries
/// do not batch streamed tokens. Hop-by-hop headers are dropped.
pub fn sanitize_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();

    // append keeps repeated names (Set-Cookie) intact
    for (name, value) in upstream {
        if is_hop_by_hop_header(name) || name == header::WWW_AUTHENTICATE {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    headers.insert(X_ACCEL_BUFFERING, HeaderValue::from_static("no"));

    headers
}
