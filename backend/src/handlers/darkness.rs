//! HTTP handler for the darkness endpoint

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use shared::models::DarknessState;

use crate::error::AppResult;
use crate::handlers::require_valid_coordinates;
use crate::AppState;

/// Query parameters for darkness evaluation
#[derive(Debug, Deserialize)]
pub struct DarknessQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Get the darkness state for a location at the current instant
pub async fn get_darkness(
    State(state): State<AppState>,
    Query(query): Query<DarknessQuery>,
) -> AppResult<Json<DarknessState>> {
    require_valid_coordinates(query.lat, query.lon)?;

    let darkness = state.darkness.state(query.lat, query.lon).await?;
    Ok(Json(darkness))
}
