//! Prometheus metrics endpoint
//!
//! Exposes relay metrics in Prometheus format for monitoring.

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

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "relay_requests_total",
        "Total number of relayed requests by target and outcome"
    );
    metrics::describe_histogram!(
        "relay_request_duration_seconds",
        "Relay duration in seconds, including the upstream call"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a relayed request
///
/// `outcome` is `relayed` when an upstream answer was passed through,
/// otherwise the error kind.
pub fn record_request(target: &str, outcome: &str, duration_secs: f64) {
    metrics::counter!(
        "relay_requests_total",
        "target" => target.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "target" => target.to_string())
        .record(duration_secs);
}
