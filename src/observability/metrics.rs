//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by site and status
//! - `edge_request_duration_seconds` (histogram): latency by site

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Site;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one served request.
pub fn record_request(site: Site, status: u16, start: Instant) {
    counter!(
        "edge_requests_total",
        "site" => site.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("edge_request_duration_seconds", "site" => site.as_str())
        .record(start.elapsed().as_secs_f64());
}
