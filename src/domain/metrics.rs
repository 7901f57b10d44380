use super::projection::{FuelingSample, VehicleSample};
use std::sync::Arc;
use std::time::Instant;

/// How a collection cycle ended, as reported to the self-metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    Success,
    Failure,
    Skipped,
}

impl CollectionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionOutcome::Success => "success",
            CollectionOutcome::Failure => "failure",
            CollectionOutcome::Skipped => "skipped",
        }
    }
}

/// Abstraction for the exporter's metric registry (gauges plus self-metrics).
///
/// Setting a sample overwrites the previous value for the same label set;
/// implementations must allow `render` to run concurrently with writes.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Set the vehicle-level gauges for one vehicle.
    fn record_vehicle(&self, sample: &VehicleSample);

    /// Set the fueling-level gauges for one fueling.
    fn record_fueling(&self, sample: &FuelingSample);

    /// Record the duration and outcome of a collection cycle.
    fn record_collection(&self, start: Instant, outcome: CollectionOutcome);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
