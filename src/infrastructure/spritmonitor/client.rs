//! HTTP client for the Spritmonitor REST API.
//!
//! Every request carries HTTP Basic credentials plus the three headers the
//! API insists on (application id, the Android app user agent and the
//! response language). Requests without them are rejected upstream.

use crate::config::ApiConfig;
use crate::domain::{FetchError, Fueling, Vehicle, VehicleSource};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

const APPLICATION_ID: &str = "81699ea0a8cf1e252cbbf5e582f3aad3";
const USER_AGENT: &str = "Spritmonitor.de Android App (28) Samsung Galaxy S10";
const API_LANGUAGE: &str = "en";

/// Upper bound on fuelings fetched per vehicle and cycle.
pub const FUELING_LIMIT: u32 = 1000;

/// Spritmonitor-backed [`VehicleSource`].
pub struct SpritmonitorClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl SpritmonitorClient {
    // ---

    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        // ---
        let mut headers = HeaderMap::new();
        headers.insert("Application-Id", HeaderValue::from_static(APPLICATION_ID));
        headers.insert("API-Language", HeaderValue::from_static(API_LANGUAGE));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Performs an authenticated GET of `path` (relative to the base URL)
    /// and decodes the JSON body into `T`.
    #[tracing::instrument(skip(self))]
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        // ---
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            path: path.to_string(),
            source,
        })?;
        tracing::debug!(bytes = body.len(), "Received response body");

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

pub(crate) fn fuelings_path(vehicle_id: i64) -> String {
    format!("vehicle/{vehicle_id}/fuelings.json?limit={FUELING_LIMIT}")
}

#[async_trait::async_trait]
impl VehicleSource for SpritmonitorClient {
    // ---
    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        self.get("vehicles.json").await
    }

    async fn fuelings(&self, vehicle_id: i64) -> Result<Vec<Fueling>, FetchError> {
        self.get(&fuelings_path(vehicle_id)).await
    }
}
