//! Gemini adapter handler
//!
//! Handles `/api/gemini/{*path}`: authenticates the caller via the
//! access-code collaborator, translates the OpenAI-style chat body into
//! Gemini's content/role schema, and relays the streaming generation call.
//! The model allow-list applies here exactly as on the generic forwarder.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{AppError, RelayRejection},
    middleware::auth,
    models,
    proxy::{self, routing, ProviderTarget},
    routes::metrics::record_request,
    translate,
    AppState,
};

/// Fixed Gemini model served by this adapter
const GEMINI_MODEL: &str = "gemini-pro";

/// Adapter handler for all `/api/gemini/{*path}` requests
pub async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    incoming_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let start_time = Instant::now();
    let config = &state.config;

    // CORS preflight answers before auth is consulted
    if method == Method::OPTIONS {
        return Ok((StatusCode::OK, Json(json!({ "body": "OK" }))).into_response());
    }

    if let Err(rejection) = auth::check(&incoming_headers, config) {
        warn!(msg = %rejection.msg, "Gemini request rejected by auth");
        return Ok((StatusCode::UNAUTHORIZED, Json(rejection)).into_response());
    }

    let Some(api_key) = &config.google_api_key else {
        return Ok(Json(RelayRejection::new(
            "missing GOOGLE_API_KEY in server env vars",
        ))
        .into_response());
    };

    let chat_body: translate::ChatBody = serde_json::from_slice(&body)?;

    if config.custom_models.is_some() {
        let table = models::collect_model_table(config.custom_models.as_deref().unwrap_or(""));
        let model = chat_body.model.as_deref().unwrap_or(GEMINI_MODEL);
        if matches!(table.get(model), Some(entry) if !entry.available) {
            info!(model = %model, "Refusing disabled model");
            return Ok((
                StatusCode::FORBIDDEN,
                Json(RelayRejection::new(format!(
                    "you are not allowed to use {model} model"
                ))),
            )
                .into_response());
        }
    }

    let gemini_body = translate::translate_chat_body(&chat_body);
    let path = format!("v1beta/models/{GEMINI_MODEL}:streamGenerateContent?key={api_key}");

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let target = ProviderTarget {
        base_url: routing::normalize_base_url(&config.gemini_api_url),
        path,
        headers,
    };

    info!(base_url = %target.base_url, model = GEMINI_MODEL, "Forwarding Gemini request");

    let response = proxy::relay(
        &state.http_client,
        method,
        target,
        serde_json::to_vec(&gemini_body)?.into(),
        config.upstream_timeout(),
    )
    .await?;

    let duration = start_time.elapsed().as_secs_f64();
    let status_label = if response.status().is_success() {
        "success"
    } else {
        "error"
    };
    record_request(status_label, "gemini", duration);

    info!(
        status = %response.status(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Gemini request completed"
    );

    Ok(response)
}
