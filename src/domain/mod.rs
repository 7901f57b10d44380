mod metrics;
mod projection;
mod source;
mod vehicle;

// Publicly expose the Metrics abstraction
pub use self::metrics::{CollectionOutcome, Metrics, MetricsPtr};

// Publicly expose the upstream data source abstraction
pub use source::{FetchError, VehicleSource, VehicleSourcePtr};

// Records and their projection onto gauge samples
pub use projection::{FuelingLabels, FuelingSample, VehicleLabels, VehicleSample};
pub use vehicle::{null_as_default, Fueling, LooseNumber, Vehicle};
