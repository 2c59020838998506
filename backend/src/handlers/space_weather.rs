//! HTTP handlers for space weather endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use shared::models::GeomagneticReading;

use crate::error::{AppError, AppResult};
use crate::services::space_weather::DEFAULT_SERIES_WINDOW_MINUTES;
use crate::AppState;

/// Get the most recent planetary Kp reading
pub async fn get_current_kp(State(state): State<AppState>) -> AppResult<Json<GeomagneticReading>> {
    let reading = state.space_weather.current_kp().await?;
    Ok(Json(reading))
}

/// Query parameters for the Kp series
#[derive(Debug, Deserialize)]
pub struct KpSeriesQuery {
    pub window_minutes: Option<i64>,
}

/// Get the trailing Kp series
pub async fn get_kp_series(
    State(state): State<AppState>,
    Query(query): Query<KpSeriesQuery>,
) -> AppResult<Json<Vec<GeomagneticReading>>> {
    let window = query
        .window_minutes
        .unwrap_or(DEFAULT_SERIES_WINDOW_MINUTES);
    if window <= 0 {
        return Err(AppError::Validation(
            "window_minutes must be positive".to_string(),
        ));
    }

    let series = state.space_weather.kp_series(window).await?;
    Ok(Json(series))
}
