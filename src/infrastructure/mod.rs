pub mod metrics;
pub mod spritmonitor;

// Re-export the factory functions for easy access
pub use self::metrics::create_prom_metrics;
pub use spritmonitor::create as create_spritmonitor_source;
