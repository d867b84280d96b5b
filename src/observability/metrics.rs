//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): handled requests by method, path, status
//! - `gateway_request_duration_seconds` (histogram): latency by method, path
//! - `gateway_upstream_retries_total` (counter): downstream retries by operation
//!
//! Recording is cheap and safe to call before `init_metrics`; without an
//! installed recorder the macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled client-facing request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one retry attempt against the downstream service.
pub fn record_retry(operation: &'static str) {
    counter!("gateway_upstream_retries_total", "operation" => operation).increment(1);
}
