//! Access-code authentication for the Gemini route
//!
//! The Gemini adapter calls upstream with the server's own API key, so the
//! caller must present one of the configured access codes. An empty
//! `ACCESS_CODES` set leaves the route open.

use axum::http::{header, HeaderMap};
use serde::Serialize;

use crate::config::Config;

/// Rejection payload returned to the caller with status 401
#[derive(Debug, Serialize)]
pub struct AuthRejection {
    pub error: bool,
    pub msg: String,
}

impl AuthRejection {
    fn new(msg: &str) -> Self {
        Self {
            error: true,
            msg: msg.to_string(),
        }
    }
}

/// Extract the Authorization header and return the bearer token
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Check the request's access code against the configured set
pub fn check(headers: &HeaderMap, config: &Config) -> Result<(), AuthRejection> {
    if config.access_codes.is_empty() {
        return Ok(());
    }

    let code = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .unwrap_or("");

    if code.is_empty() {
        return Err(AuthRejection::new("empty access code"));
    }

    if !config.access_codes.contains(code) {
        return Err(AuthRejection::new("wrong access code"));
    }

    Ok(())
}
