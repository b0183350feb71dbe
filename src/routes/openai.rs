//! Generic OpenAI/Azure/Copilot forwarding handler
//!
//! Handles `/api/openai/{*path}`: resolves the upstream per the configured
//! precedence (Copilot > Azure > custom base URL > default), rewrites the
//! path, builds provider headers, applies the model allow-list check when
//! overrides are configured, and relays the upstream response.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{OriginalUri, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::BodyExt;
use tracing::info;

use crate::{
    error::{AppError, RelayRejection},
    models,
    proxy::{self, headers, routing, ProviderTarget},
    routes::metrics::record_request,
    AppState,
};

/// Forwarding handler for all `/api/openai/{*path}` requests
pub async fn forward(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    incoming_headers: HeaderMap,
    request: axum::extract::Request,
) -> Result<Response, AppError> {
    let start_time = Instant::now();
    let config = &state.config;

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let copilot = routing::uses_copilot(config);
    let mut path = routing::strip_inbound_prefix(&path_and_query, copilot);
    let base_url = routing::resolve_base_url(config);

    info!(path = %path, base_url = %base_url, copilot = copilot, "Forwarding request");

    if config.is_azure() {
        let Some(api_version) = &config.azure_api_version else {
            return Ok(Json(RelayRejection::new(
                "missing AZURE_API_VERSION in server env vars",
            ))
            .into_response());
        };
        path = routing::make_azure_path(&path, api_version);
    }

    let outbound_headers = if copilot {
        let copilot_auth = state.copilot.as_ref().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Copilot routing without configured token"))
        })?;
        copilot_auth.request_headers().await?
    } else {
        headers::build_relay_headers(
            &incoming_headers,
            config.is_azure(),
            config.openai_org_id.as_deref(),
        )
    };

    let body = request.into_body();

    // The allow-list check is the only place a request body gets buffered;
    // everything else streams straight through.
    let upstream_body: reqwest::Body = if config.custom_models.is_some() {
        let bytes = body
            .collect()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read request body: {e}")))?
            .to_bytes();

        if !bytes.is_empty() {
            let table = models::collect_model_table(config.custom_models.as_deref().unwrap_or(""));
            if let Some(model) = models::find_disabled_model(&bytes, &table) {
                info!(model = %model, "Refusing disabled model");
                record_request("refused", &path, start_time.elapsed().as_secs_f64());
                return Ok((
                    StatusCode::FORBIDDEN,
                    Json(RelayRejection::new(format!(
                        "you are not allowed to use {model} model"
                    ))),
                )
                    .into_response());
            }
        }

        bytes.into()
    } else {
        reqwest::Body::wrap_stream(body.into_data_stream())
    };

    let target = ProviderTarget {
        base_url,
        path: path.clone(),
        headers: outbound_headers,
    };

    let response = proxy::relay(
        &state.http_client,
        method,
        target,
        upstream_body,
        config.upstream_timeout(),
    )
    .await?;

    let duration = start_time.elapsed().as_secs_f64();
    let status_label = if response.status().is_success() {
        "success"
    } else {
        "error"
    };
    record_request(status_label, &path, duration);

    info!(
        path = %path,
        status = %response.status(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Forwarded request completed"
    );

    Ok(response)
}
