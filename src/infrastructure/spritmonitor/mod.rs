mod client;

pub use client::SpritmonitorClient;

use crate::config::ApiConfig;
use std::sync::Arc;

/// Creates the HTTP-backed vehicle source for the Spritmonitor API.
///
/// Returns a fully initialized source ready for use by the collector.
pub fn create(config: &ApiConfig) -> anyhow::Result<crate::domain::VehicleSourcePtr> {
    tracing::info!(base_url = %config.base_url, "Initializing Spritmonitor client");
    Ok(Arc::new(SpritmonitorClient::new(config)?))
}
