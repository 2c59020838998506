//! HTTP handlers for weather endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use shared::models::{CurrentConditions, CurrentConditionsResult, WeatherSample};

use crate::error::{AppError, AppResult};
use crate::handlers::require_valid_coordinates;
use crate::AppState;

/// Query parameters for coordinate-based weather lookups
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    pub timezone: Option<String>,
}

/// Get the 48-hour hourly forecast.
///
/// A location the model has no data for answers with an empty array.
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<Vec<WeatherSample>>> {
    require_valid_coordinates(query.lat, query.lon)?;
    let timezone = query.timezone.unwrap_or_else(|| "UTC".to_string());

    let samples = state.weather.forecast(query.lat, query.lon, &timezone).await?;
    Ok(Json(samples.unwrap_or_default()))
}

/// Get the current conditions snapshot.
///
/// An upstream throttle surfaces as 429 here, carrying the retry message.
pub async fn get_current_conditions(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<CurrentConditions>> {
    require_valid_coordinates(query.lat, query.lon)?;

    match state.weather.current_conditions(query.lat, query.lon).await? {
        CurrentConditionsResult::Ok { conditions } => Ok(Json(conditions)),
        CurrentConditionsResult::RateLimited { message } => Err(AppError::RateLimited(message)),
    }
}
