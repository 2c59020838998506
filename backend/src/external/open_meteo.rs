//! Open-Meteo clients for the hourly forecast and place geocoding
//!
//! Both endpoints are keyless. The forecast payload is column-oriented:
//! parallel arrays per variable, indexed by the `time` array, with nulls
//! where the model has no value.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use shared::models::{Location, WeatherSample};

use crate::error::{AppError, AppResult};

const FORECAST_SERVICE: &str = "Open-Meteo forecast";
const GEOCODING_SERVICE: &str = "Open-Meteo geocoding";

/// Hourly variables requested from the forecast endpoint
const HOURLY_VARIABLES: &str = "cloudcover,cloudcover_low,cloudcover_mid,cloudcover_high,\
temperature_2m,dewpoint_2m,relative_humidity_2m,visibility,windspeed_10m,windgusts_10m,\
precipitation,precipitation_probability";

/// Forecast horizon in days (48 hourly samples)
const FORECAST_DAYS: u8 = 2;

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_base_url: String,
    geocoding_base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(default)]
    cloudcover: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_low: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_mid: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_high: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    dewpoint_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    visibility: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    windgusts_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: Option<String>,
}

impl OpenMeteoClient {
    /// Create a client against the production endpoints
    pub fn new(client: Client) -> Self {
        Self::with_base_urls(
            client,
            "https://api.open-meteo.com".to_string(),
            "https://geocoding-api.open-meteo.com".to_string(),
        )
    }

    /// Create a client with custom base URLs (for testing)
    pub fn with_base_urls(
        client: Client,
        forecast_base_url: String,
        geocoding_base_url: String,
    ) -> Self {
        Self {
            client,
            forecast_base_url,
            geocoding_base_url,
        }
    }

    /// Fetch the 48-hour hourly forecast for a location.
    ///
    /// Timestamps come back in the requested zone without an offset.
    /// Returns `None` (not an error) when the payload has no hourly block.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> AppResult<Option<Vec<WeatherSample>>> {
        let url = format!("{}/v1/forecast", self.forecast_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("windspeed_unit", "ms".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", timezone.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Forecast request failed: {}", e);
                AppError::UpstreamUnavailable {
                    service: FORECAST_SERVICE,
                }
            })?;

        if !response.status().is_success() {
            tracing::error!("Forecast returned {}", response.status());
            return Err(AppError::UpstreamUnavailable {
                service: FORECAST_SERVICE,
            });
        }

        let data: ForecastResponse = response.json().await.map_err(|e| {
            tracing::error!("Forecast payload malformed: {}", e);
            AppError::UpstreamUnavailable {
                service: FORECAST_SERVICE,
            }
        })?;

        Ok(data.hourly.map(convert_hourly))
    }

    /// Resolve a place name to its best match, or `None` when unknown
    pub async fn geocode(&self, name: &str) -> AppResult<Option<Location>> {
        let url = format!("{}/v1/search", self.geocoding_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Geocoding request failed: {}", e);
                AppError::UpstreamUnavailable {
                    service: GEOCODING_SERVICE,
                }
            })?;

        if !response.status().is_success() {
            tracing::error!("Geocoding returned {}", response.status());
            return Err(AppError::UpstreamUnavailable {
                service: GEOCODING_SERVICE,
            });
        }

        let data: GeocodingResponse = response.json().await.map_err(|e| {
            tracing::error!("Geocoding payload malformed: {}", e);
            AppError::UpstreamUnavailable {
                service: GEOCODING_SERVICE,
            }
        })?;

        Ok(data.results.into_iter().next().map(|result| Location {
            name: result.name,
            country: result.country.unwrap_or_default(),
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone.unwrap_or_else(|| "UTC".to_string()),
        }))
    }
}

/// Zip the column-oriented hourly block into row samples.
///
/// A row whose timestamp fails to parse is dropped; a short or missing
/// column leaves that field empty for the trailing rows.
fn convert_hourly(hourly: HourlyBlock) -> Vec<WeatherSample> {
    let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    hourly
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, raw_time)| {
            let time = parse_local_time(raw_time)?;
            Some(WeatherSample {
                time,
                cloud_total_pct: column(&hourly.cloudcover, i),
                cloud_low_pct: column(&hourly.cloudcover_low, i),
                cloud_mid_pct: column(&hourly.cloudcover_mid, i),
                cloud_high_pct: column(&hourly.cloudcover_high, i),
                temp_c: column(&hourly.temperature_2m, i),
                dewpoint_c: column(&hourly.dewpoint_2m, i),
                rh_pct: column(&hourly.relative_humidity_2m, i),
                // Upstream reports metres.
                visibility_km: column(&hourly.visibility, i).map(|m| m / 1000.0),
                wind_ms: column(&hourly.windspeed_10m, i),
                gust_ms: column(&hourly.windgusts_10m, i),
                precip_mm: column(&hourly.precipitation, i),
                precip_prob_pct: column(&hourly.precipitation_probability, i),
            })
        })
        .collect()
}

/// Parse the zone-less local timestamps Open-Meteo returns
fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
