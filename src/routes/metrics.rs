//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    metrics::describe_counter!(
        "courier_requests_total",
        "Total number of requests relayed"
    );
    metrics::describe_histogram!(
        "courier_request_duration_seconds",
        "Relay duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record one relayed request
pub fn record_request(status: &str, path: &str, duration_secs: f64) {
    metrics::counter!("courier_requests_total", "status" => status.to_string(), "path" => path.to_string())
        .increment(1);
    metrics::histogram!("courier_request_duration_seconds", "path" => path.to_string())
        .record(duration_secs);
}
