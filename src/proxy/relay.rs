//! The forwarding core
//!
//! One relay path shared by every provider route: handlers resolve a
//! `ProviderTarget` (base URL, upstream-relative path, outbound headers) and
//! hand it here together with the request body. The upstream response is
//! streamed back byte for byte with scrubbed headers.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Response, StatusCode};
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::proxy::headers::sanitize_response_headers;

/// Fully resolved upstream destination for one request
#[derive(Debug)]
pub struct ProviderTarget {
    pub base_url: String,
    pub path: String,
    pub headers: reqwest::header::HeaderMap,
}

impl ProviderTarget {
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.path)
    }

    /// URL with the query string dropped. The Gemini path carries the API
    /// key as a query parameter, so log lines use this form.
    pub fn loggable_url(&self) -> String {
        let url = self.url();
        match url.split_once('?') {
            Some((base, _)) => base.to_string(),
            None => url,
        }
    }
}

/// Forward one request to the resolved target and relay the response.
///
/// The whole upstream call, streamed body included, is bounded by `timeout`;
/// redirects are never followed (client-wide policy) so the caller sees them
/// as-is.
pub async fn relay(
    client: &reqwest::Client,
    method: Method,
    target: ProviderTarget,
    body: reqwest::Body,
    timeout: Duration,
) -> AppResult<Response<Body>> {
    let url = target.url();
    let log_url = target.loggable_url();

    let mut request_builder = client
        .request(method.clone(), &url)
        .headers(target.headers)
        .timeout(timeout);

    // GET/HEAD carry no body
    if method != Method::GET && method != Method::HEAD {
        request_builder = request_builder.body(body);
    }

    let response = request_builder.send().await.map_err(|e| {
        error!(url = %log_url, error = %e, "Upstream request failed");
        e
    })?;

    let status = response.status();
    debug!(url = %log_url, status = %status, "Received upstream response");

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY));

    let headers = sanitize_response_headers(response.headers());
    if let Some(response_headers) = builder.headers_mut() {
        *response_headers = headers;
    }

    builder
        .body(Body::from_stream(response.bytes_stream()))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {e}")))
}
