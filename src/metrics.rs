//! Prometheus metrics for query latency and failure tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

/// Database query latency metric name.
pub const METRIC_DB_QUERY_LATENCY: &str = "db_query_latency_ms";
/// Database query failures counter metric name.
pub const METRIC_DB_QUERY_FAILURES: &str = "db_query_failures_total";

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus recorder and metric descriptions.
/// Call this once at startup.
pub fn init_metrics() {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = PROMETHEUS.set(handle);
        }
        Err(err) => warn!("Failed to install Prometheus recorder: {}", err),
    }

    describe_histogram!(
        METRIC_DB_QUERY_LATENCY,
        "Database query latency in milliseconds"
    );
    describe_counter!(
        METRIC_DB_QUERY_FAILURES,
        "Total number of database queries that failed"
    );

    debug!("Metrics initialized");
}

/// Render the current metrics in Prometheus exposition format.
///
/// Returns an empty string if the recorder was never installed (e.g.
/// in tests that build routers without calling [`init_metrics`]).
pub fn render() -> String {
    PROMETHEUS.get().map(PrometheusHandle::render).unwrap_or_default()
}

/// Record the latency of one database query.
pub fn record_query_latency(start: Instant, query: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_DB_QUERY_LATENCY, "query" => query).record(latency_ms);
}

/// Increment the failure counter for one database query.
pub fn inc_query_failures(query: &'static str) {
    counter!(METRIC_DB_QUERY_FAILURES, "query" => query).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_recorder_is_empty() {
        // The recorder is only installed by init_metrics in main.
        assert_eq!(render(), "");
    }
}
