//! Metrics collection and exposition.
//!
//! # Metrics
//! - `harness_health_checks_total` (counter): health checks by outcome
//! - `harness_triggers_total` (counter): failure triggers by kind and source
//! - `harness_reports_total` (counter): downstream reports by outcome
//! - `harness_scheduler_active` (gauge): 1 while the chaos job is scheduled
//! - `harness_container_commands_total` (counter): container commands by outcome
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_health_check(outcome: &'static str) {
    metrics::counter!("harness_health_checks_total", "outcome" => outcome).increment(1);
}

pub fn record_trigger(kind: &'static str, source: &'static str) {
    metrics::counter!("harness_triggers_total", "kind" => kind, "source" => source).increment(1);
}

pub fn record_report(outcome: &'static str) {
    metrics::counter!("harness_reports_total", "outcome" => outcome).increment(1);
}

pub fn set_scheduler_active(active: bool) {
    metrics::gauge!("harness_scheduler_active").set(if active { 1.0 } else { 0.0 });
}

pub fn record_container_command(outcome: &'static str) {
    metrics::counter!("harness_container_commands_total", "outcome" => outcome).increment(1);
}
