// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

use domain::MetricsPtr;
use handlers::{health_check, metrics_handler, root_handler};

// Public exports (visible outside this module)
pub mod collector;
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

// Hoist up only the public symbol(s)
pub use collector::{
    run_schedule, CollectionStatus, Collector, CycleOutcome, CycleSummary, FailurePolicy,
};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_prom_metrics, // ---
    create_spritmonitor_source,
};

/// Everything `main` needs to serve metrics and drive collection.
pub struct App {
    pub router: Router,
    pub collector: Arc<Collector>,
}

/// Build the HTTP router serving the given registry and collector status.
pub fn create_router(metrics: MetricsPtr, collector: Arc<Collector>) -> Router {
    // ---
    let app_state = AppState::new(metrics, collector);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(app_state)
}

/// Wire the Spritmonitor client, the metric registry and the collector
/// together from validated configuration.
pub fn create_app(config: &AppConfig) -> Result<App> {
    // ---
    let metrics = create_prom_metrics()?;
    let source = create_spritmonitor_source(&config.api)?;
    let collector = Arc::new(Collector::new(source, metrics.clone()));

    Ok(App {
        router: create_router(metrics, collector.clone()),
        collector,
    })
}
