//! Route definitions for the Aurora Visibility Service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Space weather feeds
        .nest("/space-weather", space_weather_routes())
        // Location resolution
        .nest("/locations", location_routes())
        // Weather feeds
        .nest("/weather", weather_routes())
        // Darkness state
        .route("/darkness", get(handlers::get_darkness))
        // Composite evaluation
        .nest("/visibility", visibility_routes())
        // Alert decisions
        .nest("/alerts", alert_routes())
}

fn space_weather_routes() -> Router<AppState> {
    Router::new()
        .route("/kp/current", get(handlers::get_current_kp))
        .route("/kp/series", get(handlers::get_kp_series))
}

fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search_location))
        .route("/presets", get(handlers::list_preset_locations))
}

fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::get_forecast))
        .route("/current", get(handlers::get_current_conditions))
}

fn visibility_routes() -> Router<AppState> {
    Router::new().route("/evaluate", get(handlers::evaluate_visibility))
}

fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/decide", post(handlers::decide_alert))
        .route("/dispatch-status", get(handlers::get_dispatch_status))
}
