//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the keyed current-conditions upstream is usable
    pub conditions_api: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let conditions_api = if state.weather.conditions_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        conditions_api: conditions_api.to_string(),
    })
}
