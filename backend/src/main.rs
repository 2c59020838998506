//! Aurora Visibility Service - Backend Server
//!
//! Aggregates the planetary Kp index, cloud forecasts, and solar times
//! into a composite aurora visibility score, with alert decisions on top.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::cache::{Clock, SystemClock};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{OpenMeteoClient, OpenWeatherClient, SunriseSunsetClient, SwpcClient};
use services::{
    AlertService, DarknessService, EvaluationService, LocationService, SpaceWeatherService,
    WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub space_weather: SpaceWeatherService,
    pub weather: WeatherService,
    pub darkness: DarknessService,
    pub locations: LocationService,
    pub evaluation: EvaluationService,
    pub alerts: AlertService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurora_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Aurora Visibility Server");
    tracing::info!("Environment: {}", config.environment);

    let state = build_state(&config)?;

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire the HTTP client, caches, and services from configuration
fn build_state(config: &Config) -> anyhow::Result<AppState> {
    // One upstream client carrying the bounded timeout for every feed.
    let http = Client::builder()
        .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
        .build()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let swpc = SwpcClient::with_base_url(http.clone(), config.upstream.swpc_base_url.clone());
    let open_meteo = OpenMeteoClient::with_base_urls(
        http.clone(),
        config.upstream.open_meteo_base_url.clone(),
        config.upstream.geocoding_base_url.clone(),
    );
    let sun = SunriseSunsetClient::with_base_url(
        http.clone(),
        config.upstream.sunrise_sunset_base_url.clone(),
    );

    let conditions_client = if config.weather_api.api_key.is_empty() {
        tracing::warn!("OpenWeatherMap API key not set; current conditions disabled");
        None
    } else {
        Some(OpenWeatherClient::with_base_url(
            http,
            config.weather_api.api_key.clone(),
            config.upstream.openweather_base_url.clone(),
        ))
    };

    let space_weather = SpaceWeatherService::new(
        swpc,
        chrono::Duration::seconds(config.cache.kp_series_ttl_secs),
        clock.clone(),
    );
    let weather = WeatherService::new(
        open_meteo.clone(),
        conditions_client,
        config.weather_api.units.clone(),
        chrono::Duration::seconds(config.cache.forecast_ttl_secs),
        chrono::Duration::seconds(config.cache.current_conditions_ttl_secs),
        clock.clone(),
    );
    let darkness = DarknessService::new(sun, clock.clone());
    let locations = LocationService::new(open_meteo);
    let evaluation = EvaluationService::new(
        locations.clone(),
        space_weather.clone(),
        weather.clone(),
        darkness.clone(),
    );
    let alerts = AlertService::new(config.alerts.clone(), config.smtp.clone(), clock);

    Ok(AppState {
        config: Arc::new(config.clone()),
        space_weather,
        weather,
        darkness,
        locations,
        evaluation,
        alerts,
    })
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Aurora Visibility Service API v1"
}

/// Liveness probe
async fn health() -> &'static str {
    "OK"
}
