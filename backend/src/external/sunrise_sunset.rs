//! sunrise-sunset.org client for darkness evaluation

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use shared::models::DarknessState;

use crate::error::{AppError, AppResult};

const SERVICE: &str = "sunrise-sunset service";

/// sunrise-sunset.org API client
#[derive(Clone)]
pub struct SunriseSunsetClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SunTimesResponse {
    results: SunTimes,
}

#[derive(Debug, Deserialize)]
struct SunTimes {
    sunrise: String,
    sunset: String,
}

impl SunriseSunsetClient {
    /// Create a client against the production endpoint
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, "https://api.sunrise-sunset.org".to_string())
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch today's solar times and evaluate darkness at `now`.
    ///
    /// `formatted=0` asks for ISO-8601 instants in UTC, so the comparison
    /// stays in UTC regardless of the location's zone.
    pub async fn darkness(
        &self,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> AppResult<DarknessState> {
        let url = format!("{}/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Solar times request failed: {}", e);
                AppError::UpstreamUnavailable { service: SERVICE }
            })?;

        if !response.status().is_success() {
            tracing::error!("Solar times returned {}", response.status());
            return Err(AppError::UpstreamUnavailable { service: SERVICE });
        }

        let data: SunTimesResponse = response.json().await.map_err(|e| {
            tracing::error!("Solar times payload malformed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        let sunrise = parse_instant(&data.results.sunrise)
            .ok_or(AppError::UpstreamUnavailable { service: SERVICE })?;
        let sunset = parse_instant(&data.results.sunset)
            .ok_or(AppError::UpstreamUnavailable { service: SERVICE })?;

        Ok(DarknessState::evaluate(sunrise, sunset, now))
    }
}

/// Parse the ISO-8601 instants the unformatted API returns
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
