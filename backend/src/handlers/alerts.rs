//! HTTP handlers for alert decisions

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::services::alerts::{AlertDecision, AlertDecisionInput, DispatchStatus};
use crate::AppState;

/// Decide whether an alert should be dispatched now
pub async fn decide_alert(
    State(state): State<AppState>,
    Json(input): Json<AlertDecisionInput>,
) -> AppResult<Json<AlertDecision>> {
    let decision = state.alerts.decide(input)?;
    Ok(Json(decision))
}

/// Report whether the email dispatch collaborator is configured
pub async fn get_dispatch_status(State(state): State<AppState>) -> Json<DispatchStatus> {
    Json(state.alerts.dispatch_status())
}
