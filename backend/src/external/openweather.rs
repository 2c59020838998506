//! OpenWeatherMap client for the current-conditions snapshot
//!
//! The only keyed upstream. Free-tier keys throttle hard, so a 429 is
//! treated as an answer rather than a failure: the rate-limited result is
//! cached like data and the key gets a full validity window to recover.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use shared::models::{CurrentConditions, CurrentConditionsResult};

use crate::error::{AppError, AppResult};

const SERVICE: &str = "OpenWeatherMap";

/// Message surfaced while the API key is throttled
const RATE_LIMIT_MESSAGE: &str = "OpenWeatherMap rate limit reached. Please try again shortly.";

/// OpenWeatherMap API client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    weather: Vec<OwmWeather>,
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
    clouds: Option<OwmClouds>,
    sys: Option<OwmSys>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<i32>,
    humidity: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
}

impl OpenWeatherClient {
    /// Create a client against the production endpoint
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(
            client,
            api_key,
            "https://api.openweathermap.org/data/2.5".to_string(),
        )
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch the current conditions snapshot.
    ///
    /// Coordinates are rounded to three decimals before querying so nearby
    /// repeats land on the same cache entry downstream.
    pub async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
        units: &str,
    ) -> AppResult<CurrentConditionsResult> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", round3(latitude).to_string()),
                ("lon", round3(longitude).to_string()),
                ("appid", self.api_key.clone()),
                ("units", units.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Current conditions request failed: {}", e);
                AppError::UpstreamUnavailable { service: SERVICE }
            })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Current conditions rate limited");
            return Ok(CurrentConditionsResult::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
            });
        }

        if !response.status().is_success() {
            tracing::error!("Current conditions returned {}", response.status());
            return Err(AppError::UpstreamUnavailable { service: SERVICE });
        }

        let data: OwmCurrentResponse = response.json().await.map_err(|e| {
            tracing::error!("Current conditions payload malformed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        Ok(CurrentConditionsResult::Ok {
            conditions: convert_current(data),
        })
    }
}

/// Round a coordinate to three decimals, the upstream cache granularity
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Convert the raw payload into the snapshot model
fn convert_current(data: OwmCurrentResponse) -> CurrentConditions {
    let (description, icon) = match data.weather.into_iter().next() {
        Some(w) => (w.description, w.icon),
        None => (None, None),
    };
    let icon_url = icon
        .as_ref()
        .map(|code| format!("https://openweathermap.org/img/wn/{code}@2x.png"));

    CurrentConditions {
        city: data.name,
        country: data.sys.and_then(|s| s.country),
        description,
        temp_c: data.main.as_ref().and_then(|m| m.temp),
        feels_like_c: data.main.as_ref().and_then(|m| m.feels_like),
        humidity_pct: data.main.as_ref().and_then(|m| m.humidity),
        pressure_hpa: data.main.as_ref().and_then(|m| m.pressure),
        cloud_pct: data.clouds.and_then(|c| c.all),
        wind_ms: data.wind.and_then(|w| w.speed),
        icon,
        icon_url,
    }
}
