//! Prometheus metrics implementation.
//!
//! Vehicle and fueling gauges live in an owned [`prometheus::Registry`], so
//! every instance (and every test) gets an independent set of series.
//! Self-metrics about the collection cycle go through the global `metrics`
//! recorder in `recorder.rs` and are appended when rendering.
//!
//! Gauge cells are atomic, so `render` never blocks on, or observes a torn
//! value from, a collection cycle that is writing at the same time.

use crate::domain::{
    CollectionOutcome, FuelingLabels, FuelingSample, Metrics, VehicleLabels, VehicleSample,
};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::time::Instant;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    registry: Registry,

    vehicle_consumption: GaugeVec,
    vehicle_trip_sum: GaugeVec,
    vehicle_fuel_sum: GaugeVec,

    fueling_odometer: GaugeVec,
    fueling_trip: GaugeVec,
    fueling_quantity: GaugeVec,
    fueling_cost: GaugeVec,
    fueling_consumption: GaugeVec,
}

fn register_gauge_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> prometheus::Result<GaugeVec> {
    // ---
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl PrometheusMetrics {
    // ---

    pub fn new() -> anyhow::Result<Self> {
        // ---
        tracing::info!("Creating Prometheus metrics");
        let registry = Registry::new();
        let vehicle = &VehicleLabels::NAMES;
        let fueling = &FuelingLabels::NAMES;

        Ok(PrometheusMetrics {
            vehicle_consumption: register_gauge_vec(
                &registry,
                "vehicle_consumption",
                "Vehicle Consumption",
                vehicle,
            )?,
            vehicle_trip_sum: register_gauge_vec(
                &registry,
                "vehicle_trip_sum",
                "Vehicle Trip Sum",
                vehicle,
            )?,
            vehicle_fuel_sum: register_gauge_vec(
                &registry,
                "vehicle_fuel_sum",
                "Vehicle Fuel Sum",
                vehicle,
            )?,
            fueling_odometer: register_gauge_vec(
                &registry,
                "vehicle_fueling_odometer",
                "Vehicle Fueling Odometer",
                fueling,
            )?,
            fueling_trip: register_gauge_vec(
                &registry,
                "vehicle_fueling_trip",
                "Vehicle Fueling Trip",
                fueling,
            )?,
            fueling_quantity: register_gauge_vec(
                &registry,
                "vehicle_fueling_quantity",
                "Vehicle Fueling Quantity",
                fueling,
            )?,
            fueling_cost: register_gauge_vec(
                &registry,
                "vehicle_fueling_cost",
                "Vehicle Fueling Cost",
                fueling,
            )?,
            fueling_consumption: register_gauge_vec(
                &registry,
                "vehicle_fueling_consumption",
                "Vehicle Fueling Consumption",
                fueling,
            )?,
            registry,
        })
    }

    /// Render only the vehicle and fueling gauges.
    pub fn render_gauges(&self) -> String {
        // ---
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(err) = TextEncoder::new().encode(&families, &mut buffer) {
            tracing::error!("Failed to encode gauges: {err}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        let mut text = self.render_gauges();
        text.push_str(&super::render_metrics());
        text
    }

    fn record_vehicle(&self, sample: &VehicleSample) {
        let labels = sample.labels.values();
        self.vehicle_consumption
            .with_label_values(&labels)
            .set(sample.consumption);
        self.vehicle_trip_sum
            .with_label_values(&labels)
            .set(sample.trip_sum);
        self.vehicle_fuel_sum
            .with_label_values(&labels)
            .set(sample.fuel_sum);
    }

    fn record_fueling(&self, sample: &FuelingSample) {
        let labels = sample.labels.values();
        self.fueling_odometer
            .with_label_values(&labels)
            .set(sample.odometer);
        self.fueling_trip.with_label_values(&labels).set(sample.trip);
        self.fueling_quantity
            .with_label_values(&labels)
            .set(sample.quantity);
        self.fueling_cost.with_label_values(&labels).set(sample.cost);
        self.fueling_consumption
            .with_label_values(&labels)
            .set(sample.consumption);
    }

    fn record_collection(&self, start: Instant, outcome: CollectionOutcome) {
        tracing::debug!(outcome = outcome.as_str(), "Recording collection cycle");
        super::track_collection(start, outcome);
    }
}
