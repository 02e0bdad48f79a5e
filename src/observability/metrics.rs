//! Metrics collection and exposition.
//!
//! # Metrics
//! - `jobpulse_requests_total` (counter): requests by endpoint, status
//! - `jobpulse_request_duration_seconds` (histogram): latency by endpoint
//! - `jobpulse_rejected_total` (counter): admission rejections by reason
//! - `jobpulse_counter_increments_total` (counter): increments by counter

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    counter!(
        "jobpulse_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "jobpulse_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one admission rejection (`"origin"` or `"rate_limit"`).
pub fn record_rejection(reason: &'static str) {
    counter!("jobpulse_rejected_total", "reason" => reason).increment(1);
}

/// Record one successful counter increment by counter name.
pub fn record_increment(counter_kind: &'static str) {
    counter!("jobpulse_counter_increments_total", "counter" => counter_kind).increment(1);
}
