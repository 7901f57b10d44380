//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the metric
//! registry being scraped and the collector whose status `/health` reports.
//!
//! The state is cheaply cloneable (using `Arc` internally) so it can be
//! passed to each request handler without copying resources.

use crate::collector::{CollectionStatus, Collector};
use crate::domain::MetricsPtr;
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Handlers depend on the `Metrics` trait,
///   not on the Prometheus-backed implementation.
/// - **Shared Registry**: The same `MetricsPtr` is handed to the
///   `Collector`, so scrapes observe every gauge the collector writes.
/// - **Cheap Cloning**: All fields are `Arc`s.
///
/// # Lifecycle
///
/// 1. Created once in `create_app()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
#[derive(Clone)]
pub(crate) struct AppState {
    /// Metric registry rendered by `/metrics`.
    metrics: MetricsPtr,

    /// Collector driven by the scheduler; read-only from handlers.
    collector: Arc<Collector>,
}

impl AppState {
    // ---

    pub fn new(metrics: MetricsPtr, collector: Arc<Collector>) -> Self {
        // ---
        AppState { metrics, collector }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Snapshot of the most recent collection cycles.
    pub(crate) fn collection_status(&self) -> CollectionStatus {
        // ---
        self.collector.status()
    }
}
