//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_gateway_transactions_total` (counter): submissions by outcome
//! - `wallet_gateway_balance_queries_total` (counter): balance queries by outcome
//! - `wallet_gateway_upstream_duration_seconds` (histogram): node call latency
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Outcome labels are `success` or a `GatewayError::kind()`

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::blockchain::types::GatewayResult;

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome_label<T>(result: &GatewayResult<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    }
}

/// Count one finished transaction submission.
pub fn record_transaction<T>(result: &GatewayResult<T>) {
    metrics::counter!("wallet_gateway_transactions_total", "outcome" => outcome_label(result))
        .increment(1);
}

/// Count one finished balance query.
pub fn record_balance_query<T>(result: &GatewayResult<T>) {
    metrics::counter!("wallet_gateway_balance_queries_total", "outcome" => outcome_label(result))
        .increment(1);
}

/// Record how long a node call took.
pub fn record_upstream(operation: &'static str, start: Instant) {
    metrics::histogram!("wallet_gateway_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
