//! HTTP routes for Courier
//!
//! This module defines all HTTP endpoints exposed by the proxy.

pub mod gemini;
pub mod health;
pub mod metrics;
pub mod openai;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/api/openai/*path", any(openai::forward))
        .route("/api/gemini/*path", any(gemini::forward))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
