//! HTTP handlers for location endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use shared::models::Location;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for place search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// Resolve a place name to a location
pub async fn search_location(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Location>> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let location = state
        .locations
        .geocode(name)
        .await?
        .ok_or_else(|| AppError::LocationNotFound(name.to_string()))?;
    Ok(Json(location))
}

/// List the quick-pick aurora watching locations
pub async fn list_preset_locations(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.locations.presets())
}
