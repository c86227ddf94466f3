use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: u16,
    pub version: &'static str,
    pub uptime_seconds: i64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.started_at);

    Json(HealthResponse {
        message: "Server is running",
        status: 200,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime.num_seconds().max(0),
    })
}
