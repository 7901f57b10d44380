use super::vehicle::{Fueling, Vehicle};
use std::sync::Arc;

/// Errors raised while fetching records from the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS or timeout failure.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("request to {path} returned HTTP {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    /// The body could not be decoded into the expected shape.
    #[error("response from {path} could not be decoded: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True if the failure was the request timeout firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

/// Abstraction over the two upstream endpoints the exporter reads.
#[async_trait::async_trait]
pub trait VehicleSource: Send + Sync {
    // ---
    /// List all vehicles of the account.
    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError>;

    /// List the most recent fuelings of one vehicle.
    async fn fuelings(&self, vehicle_id: i64) -> Result<Vec<Fueling>, FetchError>;
}

/// Type alias for any backend that implements VehicleSource.
pub type VehicleSourcePtr = Arc<dyn VehicleSource>;
