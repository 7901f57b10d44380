//! Spritmonitor records as returned by the upstream API.
//!
//! The API is loosely typed: numeric statistics are usually sent as
//! strings, but some accounts return bare numbers, `null`, or omit the
//! field entirely. Decoding must never fail because of such a field, so
//! every loosely-typed value is captured as a [`LooseNumber`] (or made
//! nullable via [`null_as_default`]) and normalized before use.

use serde::{Deserialize, Deserializer};

/// A numeric statistic that may arrive in several JSON shapes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    /// A bare JSON number.
    Number(f64),
    /// A number encoded as text, e.g. `"5.2"`. May be empty or garbage.
    Text(String),
    /// `null` or an absent field.
    #[default]
    Missing,
    /// Any other JSON value (bool, array, object).
    Other(serde_json::Value),
}

impl LooseNumber {
    /// Normalizes the field to a float.
    ///
    /// Text that does not parse as a float, and every non-numeric
    /// shape, yields `0.0`.
    pub fn value(&self) -> f64 {
        // ---
        match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(text) => text.parse().unwrap_or(0.0),
            LooseNumber::Missing | LooseNumber::Other(_) => 0.0,
        }
    }
}

impl From<&str> for LooseNumber {
    fn from(text: &str) -> Self {
        LooseNumber::Text(text.to_string())
    }
}

/// Deserializes `null` as `T::default()`. Combine with `#[serde(default)]`
/// to also cover absent fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A tracked vehicle (`GET vehicles.json`).
///
/// Only the fields the exporter publishes are kept; ranking info,
/// picture timestamps and the like are discarded during decoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub make: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,

    /// Average consumption over the vehicle's lifetime.
    #[serde(default)]
    pub consumption: LooseNumber,

    /// Total distance driven.
    #[serde(default)]
    pub tripsum: LooseNumber,

    /// Total fuel quantity purchased.
    #[serde(default)]
    pub quantitysum: LooseNumber,
}

/// A single refueling event of one vehicle
/// (`GET vehicle/{id}/fuelings.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fueling {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,

    /// Date as sent by the API (e.g. `"01.01.2023"`); used verbatim as a label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    #[serde(default)]
    pub odometer: LooseNumber,

    /// Distance since the previous fueling.
    #[serde(default)]
    pub trip: LooseNumber,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fuelsortid: i64,

    #[serde(default)]
    pub quantity: LooseNumber,

    #[serde(default)]
    pub cost: LooseNumber,

    #[serde(default)]
    pub consumption: LooseNumber,
}
