//! Configuration management for the Aurora Visibility Service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Optional configuration file (config/{environment}.toml)
//! 3. Environment variable overrides with AURORA prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use shared::scoring::{DEFAULT_DARKNESS_WEIGHT, DEFAULT_KP_WEIGHT, DEFAULT_SKY_WEIGHT};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream feed endpoints and timeouts
    pub upstream: UpstreamConfig,

    /// Freshness cache validity windows
    pub cache: CacheConfig,

    /// Default scoring weights
    pub scoring: ScoringConfig,

    /// Alert rule defaults
    pub alerts: AlertsConfig,

    /// Current-conditions API configuration
    pub weather_api: WeatherApiConfig,

    /// Email dispatch collaborator configuration
    pub smtp: SmtpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// NOAA SWPC base URL
    pub swpc_base_url: String,
    /// Open-Meteo forecast base URL
    pub open_meteo_base_url: String,
    /// Open-Meteo geocoding base URL
    pub geocoding_base_url: String,
    /// sunrise-sunset.org base URL
    pub sunrise_sunset_base_url: String,
    /// OpenWeatherMap base URL
    pub openweather_base_url: String,
    /// Timeout applied to every upstream call, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Kp series validity, in seconds
    pub kp_series_ttl_secs: i64,
    /// Hourly forecast validity, in seconds
    pub forecast_ttl_secs: i64,
    /// Current-conditions validity, in seconds
    pub current_conditions_ttl_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    pub kp_weight: f64,
    pub sky_weight: f64,
    pub darkness_weight: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Kp value at or above which alerts fire
    pub kp_threshold: f64,
    /// Minimum hours between consecutive alerts
    pub cooldown_hours: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherApiConfig {
    /// OpenWeatherMap API key; empty leaves the conditions panel disabled
    pub api_key: String,
    /// Unit system passed upstream
    pub units: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
}

impl SmtpConfig {
    /// Whether the dispatch bundle is complete enough to hand to an email
    /// collaborator
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.sender.is_empty() && !self.password.is_empty()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AURORA_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            // Default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("upstream.swpc_base_url", "https://services.swpc.noaa.gov")?
            .set_default("upstream.open_meteo_base_url", "https://api.open-meteo.com")?
            .set_default(
                "upstream.geocoding_base_url",
                "https://geocoding-api.open-meteo.com",
            )?
            .set_default(
                "upstream.sunrise_sunset_base_url",
                "https://api.sunrise-sunset.org",
            )?
            .set_default(
                "upstream.openweather_base_url",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("upstream.request_timeout_secs", 15)?
            .set_default("cache.kp_series_ttl_secs", 300)?
            .set_default("cache.forecast_ttl_secs", 300)?
            .set_default("cache.current_conditions_ttl_secs", 600)?
            .set_default("scoring.kp_weight", DEFAULT_KP_WEIGHT)?
            .set_default("scoring.sky_weight", DEFAULT_SKY_WEIGHT)?
            .set_default("scoring.darkness_weight", DEFAULT_DARKNESS_WEIGHT)?
            .set_default("alerts.kp_threshold", 5.0)?
            .set_default("alerts.cooldown_hours", 1.0)?
            .set_default("weather_api.api_key", "")?
            .set_default("weather_api.units", "metric")?
            .set_default("smtp.host", "")?
            .set_default("smtp.port", 587)?
            .set_default("smtp.sender", "")?
            .set_default("smtp.password", "")?
            // Environment-specific config file (optional)
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Environment variables with AURORA prefix
            .add_source(
                Environment::with_prefix("AURORA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
