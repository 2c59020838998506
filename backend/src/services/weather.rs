//! Weather service: cached hourly forecast and current conditions

use std::sync::Arc;

use chrono::Duration;

use shared::cache::{Clock, FreshnessCache};
use shared::models::{CurrentConditionsResult, WeatherSample};

use crate::error::{AppError, AppResult};
use crate::external::{OpenMeteoClient, OpenWeatherClient};

/// Coordinates as rounded milli-degrees, hashable where raw floats are not
type CoordKey = (i64, i64);

/// Weather data access
#[derive(Clone)]
pub struct WeatherService {
    forecast_client: OpenMeteoClient,
    conditions_client: Option<OpenWeatherClient>,
    units: String,
    forecast_cache: Arc<FreshnessCache<(CoordKey, String), Option<Vec<WeatherSample>>>>,
    conditions_cache: Arc<FreshnessCache<CoordKey, CurrentConditionsResult>>,
}

impl WeatherService {
    pub fn new(
        forecast_client: OpenMeteoClient,
        conditions_client: Option<OpenWeatherClient>,
        units: String,
        forecast_ttl: Duration,
        conditions_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            forecast_client,
            conditions_client,
            units,
            forecast_cache: Arc::new(FreshnessCache::with_clock(forecast_ttl, clock.clone())),
            conditions_cache: Arc::new(FreshnessCache::with_clock(conditions_ttl, clock)),
        }
    }

    /// 48-hour hourly forecast; `None` when upstream has no hourly block.
    /// The empty answer is cached too, on the same terms as data.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> AppResult<Option<Vec<WeatherSample>>> {
        let key = (coord_key(latitude, longitude), timezone.to_string());
        if let Some(samples) = self.forecast_cache.get(&key) {
            tracing::debug!("Forecast cache hit for ({}, {})", latitude, longitude);
            return Ok(samples);
        }

        let samples = self
            .forecast_client
            .forecast(latitude, longitude, timezone)
            .await?;
        self.forecast_cache.insert(key, samples.clone());
        Ok(samples)
    }

    /// Current conditions through the observation API.
    ///
    /// A rate-limited answer is cached like data, so a throttled key backs
    /// off for the full validity window instead of hammering upstream.
    pub async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<CurrentConditionsResult> {
        let client = self.conditions_client.as_ref().ok_or_else(|| {
            AppError::Configuration("OpenWeatherMap API key not configured".to_string())
        })?;

        let key = coord_key(latitude, longitude);
        if let Some(result) = self.conditions_cache.get(&key) {
            tracing::debug!("Conditions cache hit for ({}, {})", latitude, longitude);
            return Ok(result);
        }

        let result = client
            .current_conditions(latitude, longitude, &self.units)
            .await?;
        self.conditions_cache.insert(key, result.clone());
        Ok(result)
    }

    /// Whether the current-conditions panel has an API key to work with
    pub fn conditions_configured(&self) -> bool {
        self.conditions_client.is_some()
    }
}

/// Cache key as rounded milli-degrees, matching the upstream query rounding
fn coord_key(latitude: f64, longitude: f64) -> CoordKey {
    (
        (latitude * 1000.0).round() as i64,
        (longitude * 1000.0).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_key_rounds_to_milli_degrees() {
        assert_eq!(coord_key(69.64915, 18.9553), (69649, 18955));
        assert_eq!(coord_key(-21.94255, 0.0), (-21943, 0));
    }

    #[test]
    fn test_coord_key_merges_nearby_coordinates() {
        assert_eq!(coord_key(69.6491, 18.9553), coord_key(69.64914, 18.95532));
    }
}
