use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Spritmonitor Exporter
Version: {version}

Available endpoints:
  - GET    /metrics           - Vehicle and fueling gauges in Prometheus text format
  - GET    /health            - Collection status (last success, last error)

Vehicles and fuelings are refreshed from the Spritmonitor API on a schedule.
"#
    )
}
