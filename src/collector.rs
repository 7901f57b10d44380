//! Collection cycle and its scheduler.
//!
//! A cycle fetches all vehicles, then the fuelings of each vehicle one at a
//! time, and writes every record into the gauges. Gauges of vehicles or
//! fuelings that vanish upstream are left in place until restart.

use crate::domain::{
    CollectionOutcome, FetchError, FuelingSample, MetricsPtr, VehicleLabels, VehicleSample,
    VehicleSourcePtr,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// What the scheduler does when a cycle fails to fetch from upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and try again on the next tick.
    #[default]
    Continue,
    /// Stop the scheduler with the error; the process exits non-zero.
    Exit,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "exit" => Ok(FailurePolicy::Exit),
            other => Err(format!("expected `continue` or `exit`, got `{other}`")),
        }
    }
}

/// Counts of records written by one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub vehicles: usize,
    pub fuelings: usize,
}

/// Result of a call to [`Collector::collect`] that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleSummary),
    /// Another cycle was already running; nothing was fetched.
    Skipped,
}

/// Snapshot of the collector's history, served by `/health`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionStatus {
    /// Number of cycles that ran to completion or failed (skips excluded).
    pub cycles: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_summary: Option<CycleSummary>,
    pub last_error: Option<String>,
}

/// Runs collection cycles against a vehicle source and a metric registry.
pub struct Collector {
    source: VehicleSourcePtr,
    metrics: MetricsPtr,
    running: tokio::sync::Mutex<()>,
    status: Mutex<CollectionStatus>,
}

impl Collector {
    // ---

    pub fn new(source: VehicleSourcePtr, metrics: MetricsPtr) -> Self {
        // ---
        Collector {
            source,
            metrics,
            running: tokio::sync::Mutex::new(()),
            status: Mutex::new(CollectionStatus::default()),
        }
    }

    /// Runs one collection cycle.
    ///
    /// Returns [`CycleOutcome::Skipped`] without fetching if a cycle is
    /// already in progress. On a fetch error the cycle stops where it
    /// failed; gauges written earlier in the cycle keep their new values.
    pub async fn collect(&self) -> Result<CycleOutcome, FetchError> {
        // ---
        let start = Instant::now();

        let Ok(_guard) = self.running.try_lock() else {
            warn!("Collection already in progress, skipping");
            self.metrics.record_collection(start, CollectionOutcome::Skipped);
            return Ok(CycleOutcome::Skipped);
        };

        info!("Collecting sample...");
        let result = self.project_upstream().await;

        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        status.cycles += 1;
        match &result {
            Ok(summary) => {
                info!(
                    vehicles = summary.vehicles,
                    fuelings = summary.fuelings,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Collection finished"
                );
                status.last_success = Some(Utc::now());
                status.last_summary = Some(*summary);
                status.last_error = None;
                self.metrics.record_collection(start, CollectionOutcome::Success);
            }
            Err(err) => {
                error!("Collection failed: {err}");
                status.last_error = Some(err.to_string());
                self.metrics.record_collection(start, CollectionOutcome::Failure);
            }
        }

        result.map(CycleOutcome::Completed)
    }

    async fn project_upstream(&self) -> Result<CycleSummary, FetchError> {
        // ---
        let vehicles = self.source.vehicles().await?;
        let mut summary = CycleSummary {
            vehicles: vehicles.len(),
            fuelings: 0,
        };

        for vehicle in &vehicles {
            self.metrics.record_vehicle(&VehicleSample::from(vehicle));

            let labels = VehicleLabels::from(vehicle);
            let fuelings = self.source.fuelings(vehicle.id).await?;
            tracing::debug!(vehicle = vehicle.id, fuelings = fuelings.len(), "Fetched fuelings");

            for fueling in &fuelings {
                self.metrics
                    .record_fueling(&FuelingSample::new(&labels, fueling));
            }
            summary.fuelings += fuelings.len();
        }

        Ok(summary)
    }

    /// Returns a copy of the current collection status.
    pub fn status(&self) -> CollectionStatus {
        // ---
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Runs a collection cycle immediately and then once per `interval`.
///
/// Only returns if a cycle fails and the policy is [`FailurePolicy::Exit`].
pub async fn run_schedule(
    collector: Arc<Collector>,
    interval: Duration,
    policy: FailurePolicy,
) -> Result<(), FetchError> {
    // ---
    info!(?interval, ?policy, "Starting collection schedule");

    // The first tick completes immediately, giving the eager startup run.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match collector.collect().await {
            Ok(_) => {}
            Err(err) if policy == FailurePolicy::Exit => return Err(err),
            Err(_) => info!("Retrying at next scheduled collection"),
        }
    }
}
