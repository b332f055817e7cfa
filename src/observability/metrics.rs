//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics per declared route
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `waypoint_requests_total` (counter): requests by verb, route, status
//! - `waypoint_request_duration_seconds` (histogram): latency by verb, route
//!
//! # Design Decisions
//! - Labels use the route template, never the concrete path
//! - Recording is a no-op until a recorder is installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(verb: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("verb", verb.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("waypoint_requests_total", &labels).increment(1);

    let labels = [("verb", verb.to_string()), ("route", route.to_string())];
    histogram!("waypoint_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
