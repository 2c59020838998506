//! HTTP handler for the composite visibility evaluation

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use shared::validation::validate_weight;

use crate::error::{AppError, AppResult};
use crate::services::evaluation::{EvaluationReport, ScoreWeights};
use crate::AppState;

/// Query parameters for an evaluation
#[derive(Debug, Deserialize)]
pub struct EvaluateQuery {
    pub place: String,
    pub w_kp: Option<f64>,
    pub w_sky: Option<f64>,
    pub w_dark: Option<f64>,
}

/// Run the full sequential evaluation for a place
pub async fn evaluate_visibility(
    State(state): State<AppState>,
    Query(query): Query<EvaluateQuery>,
) -> AppResult<Json<EvaluationReport>> {
    let place = query.place.trim();
    if place.is_empty() {
        return Err(AppError::Validation("place must not be empty".to_string()));
    }

    let scoring = &state.config.scoring;
    let weights = ScoreWeights {
        kp: query.w_kp.unwrap_or(scoring.kp_weight),
        sky: query.w_sky.unwrap_or(scoring.sky_weight),
        darkness: query.w_dark.unwrap_or(scoring.darkness_weight),
    };
    for weight in [weights.kp, weights.sky, weights.darkness] {
        validate_weight(weight).map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let report = state.evaluation.evaluate(place, weights).await?;
    Ok(Json(report))
}
