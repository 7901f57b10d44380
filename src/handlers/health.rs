use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
    cycles: u64,
    last_success: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// Responds with the health status of the exporter.
///
/// The server is considered healthy while it is serving; a failing
/// upstream does not make `/health` fail; it is reported instead.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok", ... }` once the last cycle succeeded,
///   or before the first cycle has finished.
/// - `200 OK` with `{ "status": "degraded", "last_error": "...", ... }` if the
///   most recent cycle failed.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // ---
    let collection = state.collection_status();
    let status = if collection.last_error.is_some() {
        "degraded"
    } else {
        "ok"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            cycles: collection.cycles,
            last_success: collection.last_success,
            last_error: collection.last_error,
        }),
    )
}
