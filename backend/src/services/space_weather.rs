//! Space weather service: live current Kp and the cached trailing series

use std::sync::Arc;

use chrono::Duration;

use shared::cache::{Clock, FreshnessCache};
use shared::models::GeomagneticReading;

use crate::error::AppResult;
use crate::external::SwpcClient;

/// Default trailing window for the Kp series, in minutes
pub const DEFAULT_SERIES_WINDOW_MINUTES: i64 = 240;

/// Space weather data access
#[derive(Clone)]
pub struct SpaceWeatherService {
    client: SwpcClient,
    series_cache: Arc<FreshnessCache<i64, Vec<GeomagneticReading>>>,
    clock: Arc<dyn Clock>,
}

impl SpaceWeatherService {
    pub fn new(client: SwpcClient, series_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            series_cache: Arc::new(FreshnessCache::with_clock(series_ttl, clock.clone())),
            clock,
        }
    }

    /// Most recent Kp reading. Always fetched live: the alert rule keys
    /// off this value, so a stale reading must never suppress or fire one.
    pub async fn current_kp(&self) -> AppResult<GeomagneticReading> {
        self.client.current_kp().await
    }

    /// Trailing Kp series, cached per window size
    pub async fn kp_series(&self, window_minutes: i64) -> AppResult<Vec<GeomagneticReading>> {
        if let Some(series) = self.series_cache.get(&window_minutes) {
            tracing::debug!("Kp series cache hit for {} minutes", window_minutes);
            return Ok(series);
        }

        let series = self
            .client
            .kp_series(window_minutes, self.clock.now())
            .await?;
        self.series_cache.insert(window_minutes, series.clone());
        Ok(series)
    }
}
