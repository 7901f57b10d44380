// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use serde_json::{json, Value};
use spritmonitor_exporter::domain::MetricsPtr;
use spritmonitor_exporter::{
    create_prom_metrics, create_router, create_spritmonitor_source, ApiConfig, Collector,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use wiremock::matchers::{basic_auth, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "driver";
pub const PASSWORD: &str = "secret";
pub const APPLICATION_ID: &str = "81699ea0a8cf1e252cbbf5e582f3aad3";
pub const USER_AGENT: &str = "Spritmonitor.de Android App (28) Samsung Galaxy S10";

// ============================================================================
// Upstream fixtures
// ============================================================================

pub fn api_config(server: &MockServer, request_timeout: Duration) -> ApiConfig {
    // ---
    ApiConfig {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        base_url: format!("{}/", server.uri()),
        request_timeout,
    }
}

pub fn yaris() -> Value {
    // ---
    json!({
        "id": 1,
        "make": "Toyota",
        "model": "Yaris",
        "consumption": "5.2",
        "consumptionunit": "l/100km",
        "tripsum": "1000",
        "tripunit": "km",
        "quantitysum": "52",
        "maintank": 1,
        "sign": "",
        "picture_ts": 0,
        "bcconsumptionunit": null,
        "country": "DE",
        "rankingInfo": { "min": "4.0", "avg": "5.5", "max": "8.0", "unit": "l/100km",
                         "total": 120, "rank": 12, "histogram": [] }
    })
}

pub fn yaris_fueling() -> Value {
    // ---
    json!({
        "id": 11,
        "type": "full",
        "date": "2023-01-01",
        "odometer": "10000",
        "trip": "500",
        "fuelsortid": 2,
        "quantity": "26",
        "quantityunitid": 1,
        "quantity_converted": "26",
        "cost": "40.5",
        "currencyid": 0,
        "cost_converted": "40.5",
        "note": "",
        "attributes": "",
        "streets": "",
        "consumption": "5.2",
        "bc_speed": null,
        "bc_quantity": null,
        "bc_consumption": null,
        "position": null,
        "stationname": null,
        "tankid": 1,
        "country": null,
        "location": ""
    })
}

/// Matches a request carrying every header and credential the API requires.
pub fn authenticated_get(request_path: &str) -> wiremock::MockBuilder {
    // ---
    Mock::given(method("GET"))
        .and(path(request_path))
        .and(basic_auth(USERNAME, PASSWORD))
        .and(header("Application-Id", APPLICATION_ID))
        .and(header("User-Agent", USER_AGENT))
        .and(header("API-Language", "en"))
}

/// Serve `vehicles` and, per vehicle id, its fuelings.
pub async fn mount_upstream(server: &MockServer, vehicles: Value, fuelings: &[(i64, Value)]) {
    // ---
    authenticated_get("/vehicles.json")
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicles))
        .mount(server)
        .await;

    for (vehicle_id, body) in fuelings {
        authenticated_get(&format!("/vehicle/{vehicle_id}/fuelings.json"))
            .and(query_param("limit", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(server)
            .await;
    }
}

/// Collector reading from the mock upstream into a fresh registry.
pub fn collector_for(
    server: &MockServer,
    request_timeout: Duration,
) -> (Arc<Collector>, MetricsPtr) {
    // ---
    let metrics = create_prom_metrics().expect("metrics");
    let config = api_config(server, request_timeout);
    let source = create_spritmonitor_source(&config).expect("source");
    (Arc::new(Collector::new(source, metrics.clone())), metrics)
}

// ============================================================================
// Exposition parsing
// ============================================================================

/// Parses the `vehicle_*` samples of a Prometheus text exposition into a map
/// keyed by series name plus its labels sorted by label name.
pub fn vehicle_gauges(text: &str) -> BTreeMap<String, f64> {
    // ---
    text.lines()
        .filter(|line| line.starts_with("vehicle_"))
        .filter_map(|line| {
            let (series, value) = line.rsplit_once(' ')?;
            let (name, labels) = series.split_once('{')?;
            let mut pairs: Vec<&str> = labels.trim_end_matches('}').split(',').collect();
            pairs.sort_unstable();
            Some((format!("{name}{{{}}}", pairs.join(",")), value.parse().ok()?))
        })
        .collect()
}

/// Builds the key `vehicle_gauges` uses for `name` with the given labels.
pub fn series(name: &str, labels: &[(&str, &str)]) -> String {
    // ---
    let mut pairs: Vec<String> = labels
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect();
    pairs.sort_unstable();
    format!("{name}{{{}}}", pairs.join(","))
}

pub const YARIS: [(&str, &str); 3] = [("id", "1"), ("make", "Toyota"), ("model", "Yaris")];

pub const YARIS_FUELING: [(&str, &str); 5] = [
    ("id", "1"),
    ("make", "Toyota"),
    ("model", "Yaris"),
    ("date", "2023-01-01"),
    ("fuelsortid", "2"),
];

// ============================================================================
// HTTP test server
// ============================================================================

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new(router: axum::Router) -> Self {
        // --
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}

/// Router plus collector wired to the mock upstream.
pub fn exporter_for(server: &MockServer) -> (axum::Router, Arc<Collector>) {
    // ---
    let (collector, metrics) = collector_for(server, Duration::from_secs(10));
    (create_router(metrics, collector.clone()), collector)
}
