//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nlb_requests_total` (counter): requests passed through the begin-request hook
//! - `nlb_forwarded_for_total` (counter): remote addresses rewritten from X-Forwarded-For
//! - `nlb_forwarded_proto_total` (counter, `scheme`): schemes rewritten from X-Forwarded-Proto
//!
//! Without an installed recorder every update is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resolver::Scheme;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request() {
    metrics::counter!("nlb_requests_total").increment(1);
}

pub fn record_forwarded_for() {
    metrics::counter!("nlb_forwarded_for_total").increment(1);
}

pub fn record_forwarded_proto(scheme: Scheme) {
    metrics::counter!("nlb_forwarded_proto_total", "scheme" => scheme.as_str()).increment(1);
}
