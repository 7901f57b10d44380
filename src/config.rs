// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the exporter.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::{anyhow, bail, Result};
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and parses it strictly.
///
/// A missing variable yields the default, but a present value that
/// cannot be parsed is a startup error.
macro_rules! optional_env_strict {
    // ---
    ($key:literal, $default:expr, $parse:expr) => {
        match std::env::var($key) {
            Ok(raw) => ($parse)(raw.as_str())
                .map_err(|err| anyhow::anyhow!("Invalid configuration: {}: {err}", $key))?,
            Err(_) => $default,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// All required configuration is validated eagerly during initialization.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub api: api::ApiConfig,
    pub collection: collection::CollectionConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            api: api::ApiConfig::from_env()?,
            collection: collection::CollectionConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Address the `/metrics` endpoint is served on.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address to bind. Defaults to `0.0.0.0:8080`.
        pub listen_addr: String,
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            let raw = std::env::var("SPRITMONITOR_LISTEN_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

            Ok(Self {
                listen_addr: normalize_listen_addr(&raw),
            })
        }
    }

    pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

    /// Accepts the port-only `:8080` form and binds it on all interfaces.
    pub fn normalize_listen_addr(raw: &str) -> String {
        // ---
        let raw = raw.trim();
        if raw.starts_with(':') {
            format!("0.0.0.0{raw}")
        } else {
            raw.to_string()
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Upstream API configuration
// ============================================================

mod api {
    // ---
    use super::*;

    pub const DEFAULT_BASE_URL: &str = "https://api.spritmonitor.de/v1/";

    /// Credentials and transport settings for the Spritmonitor API.
    ///
    /// Both credentials are required; the API rejects anonymous requests.
    #[derive(Clone)]
    pub struct ApiConfig {
        /// Account name used for HTTP Basic authentication.
        pub username: String,

        /// Account password used for HTTP Basic authentication.
        pub password: String,

        /// Base URL all request paths are appended to. Always ends in `/`.
        pub base_url: String,

        /// Per-request timeout. Defaults to 10 seconds.
        pub request_timeout: Duration,
    }

    impl ApiConfig {
        /// Builds an [`ApiConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if either credential is missing, or if the
        /// timeout is not a positive number of seconds.
        pub fn from_env() -> Result<Self> {
            // ---
            let username = required_env!("SPRITMONITOR_USERNAME");
            let password = required_env!("SPRITMONITOR_PASSWORD");

            let base_url = std::env::var("SPRITMONITOR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let request_timeout = optional_env_strict!(
                "SPRITMONITOR_TIMEOUT_SEC",
                Duration::from_secs(10),
                parse_timeout
            );

            Ok(Self {
                username,
                password,
                base_url: with_trailing_slash(base_url),
                request_timeout,
            })
        }
    }

    impl std::fmt::Debug for ApiConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            // ---
            f.debug_struct("ApiConfig")
                .field("username", &self.username)
                .field("password", &"<redacted>")
                .field("base_url", &self.base_url)
                .field("request_timeout", &self.request_timeout)
                .finish()
        }
    }

    fn parse_timeout(raw: &str) -> Result<Duration> {
        // ---
        let secs: u64 = raw.trim().parse()?;
        if secs == 0 {
            bail!("timeout must be greater than zero");
        }
        Ok(Duration::from_secs(secs))
    }

    pub fn with_trailing_slash(mut url: String) -> String {
        // ---
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }
}
pub use api::ApiConfig;

// ============================================================
// Collection schedule configuration
// ============================================================

mod collection {
    // ---
    use super::*;
    use crate::collector::FailurePolicy;

    /// Controls how often the collection cycle runs and what happens
    /// when a cycle fails to reach the upstream API.
    #[derive(Debug, Clone)]
    pub struct CollectionConfig {
        /// Time between collection cycles. Defaults to 6 hours.
        pub interval: Duration,

        /// Policy applied when a cycle fails with a fetch error.
        pub on_fetch_error: FailurePolicy,
    }

    impl CollectionConfig {
        /// Builds a [`CollectionConfig`] from environment variables.
        ///
        /// # Errors
        /// An unparsable interval or policy is rejected instead of
        /// replaced by the default.
        pub fn from_env() -> Result<Self> {
            // ---
            let interval = optional_env_strict!(
                "SPRITMONITOR_EVERY",
                Duration::from_secs(6 * 60 * 60),
                parse_interval
            );
            let on_fetch_error = optional_env_strict!(
                "SPRITMONITOR_ON_FETCH_ERROR",
                FailurePolicy::default(),
                str::parse::<FailurePolicy>
            );

            Ok(Self {
                interval,
                on_fetch_error,
            })
        }
    }

    fn parse_interval(raw: &str) -> Result<Duration> {
        // ---
        let interval = parse_duration(raw)?;
        if interval.is_zero() {
            bail!("interval must be greater than zero");
        }
        Ok(interval)
    }
}
pub use collection::CollectionConfig;

// ============================================================
// Duration parsing
// ============================================================

/// Parses a duration written as a sequence of `<number><unit>` pairs,
/// e.g. `6h`, `1h30m`, `1.5h`, `90s` or `250ms`.
///
/// Supported units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
/// A bare `0` is accepted as zero.
pub fn parse_duration(input: &str) -> Result<Duration> {
    // ---
    let text = input.trim();
    if text.is_empty() {
        bail!("empty duration");
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }

    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = text;
    let mut total_nanos = 0f64;

    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
        if number_len == 0 {
            bail!("expected a number in duration {input:?}");
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| anyhow!("invalid number in duration {input:?}"))?;
        rest = &rest[number_len..];

        let unit_len = rest.find(is_numeric).unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => bail!("missing unit in duration {input:?}"),
            unit => bail!("unknown unit {unit:?} in duration {input:?}"),
        };
        rest = &rest[unit_len..];

        total_nanos += value * scale;
    }

    if !total_nanos.is_finite() || total_nanos >= u64::MAX as f64 {
        bail!("duration {input:?} is out of range");
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

// ============================================================
// Tests
// ============================================================
