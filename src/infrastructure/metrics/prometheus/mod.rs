mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{describe_collection_metrics, track_collection};
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates a new Prometheus metrics implementation.
///
/// Gauges are kept in a registry owned by the returned instance; the
/// self-metrics recorder is installed process-wide on first use.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    init_metrics();
    describe_collection_metrics();

    Ok(Arc::new(PrometheusMetrics::new()?))
}
