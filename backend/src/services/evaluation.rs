//! Full visibility evaluation: the sequential fetch-score chain
//!
//! One request walks geocoding, space weather, forecast, and darkness in
//! order. Each feed failure degrades its own section to a warning and the
//! chain continues; only an unresolvable place aborts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shared::models::{DarknessState, Location};
use shared::scoring::{
    chance_score, minimum_kp_for_latitude, score_label, visible_latitude_limit, ScoreLabel,
};

use crate::error::{AppError, AppResult};
use crate::services::{DarknessService, LocationService, SpaceWeatherService, WeatherService};

/// Weights applied to one evaluation
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub kp: f64,
    pub sky: f64,
    pub darkness: f64,
}

/// The Kp reading that went into a score
#[derive(Debug, Clone, Serialize)]
pub struct KpSummary {
    pub value: f64,
    pub observed_at: DateTime<Utc>,
}

/// Outcome of a full evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub location: Location,
    pub kp: Option<KpSummary>,
    /// Total cloud cover of the nearest forecast hour
    pub cloud_pct: Option<f64>,
    /// Hourly samples available for this location
    pub forecast_hours: usize,
    pub darkness: Option<DarknessState>,
    pub score: f64,
    pub label: ScoreLabel,
    /// Smallest Kp at which the oval reaches this latitude
    pub minimum_kp: Option<u8>,
    /// How far toward the equator the oval reaches at the observed Kp
    pub oval_latitude_limit: Option<f64>,
    /// One entry per degraded feed
    pub warnings: Vec<String>,
}

/// Orchestrates the sequential evaluation chain
#[derive(Clone)]
pub struct EvaluationService {
    locations: LocationService,
    space_weather: SpaceWeatherService,
    weather: WeatherService,
    darkness: DarknessService,
}

impl EvaluationService {
    pub fn new(
        locations: LocationService,
        space_weather: SpaceWeatherService,
        weather: WeatherService,
        darkness: DarknessService,
    ) -> Self {
        Self {
            locations,
            space_weather,
            weather,
            darkness,
        }
    }

    /// Evaluate aurora visibility for a named place.
    ///
    /// Fetches run strictly in sequence. A failed feed logs a warning and
    /// leaves its section empty; missing score inputs fall back to the
    /// insufficient-data default of zero. An unknown darkness state counts
    /// as daylight.
    pub async fn evaluate(&self, place: &str, weights: ScoreWeights) -> AppResult<EvaluationReport> {
        let location = self
            .locations
            .geocode(place)
            .await?
            .ok_or_else(|| AppError::LocationNotFound(place.to_string()))?;

        let mut warnings = Vec::new();

        let kp = match self.space_weather.current_kp().await {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!("Kp feed degraded: {}", e);
                warnings.push("Current Kp is unavailable".to_string());
                None
            }
        };

        let samples = match self
            .weather
            .forecast(location.latitude, location.longitude, &location.timezone)
            .await
        {
            Ok(Some(samples)) if !samples.is_empty() => Some(samples),
            Ok(_) => {
                warnings.push("Hourly forecast has no data for this location".to_string());
                None
            }
            Err(e) => {
                tracing::warn!("Forecast feed degraded: {}", e);
                warnings.push("Hourly forecast is unavailable".to_string());
                None
            }
        };

        let darkness = match self
            .darkness
            .state(location.latitude, location.longitude)
            .await
        {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Darkness feed degraded: {}", e);
                warnings.push("Darkness state is unavailable; assuming daylight".to_string());
                None
            }
        };

        // The nearest hour is the first sample of the 48-hour horizon.
        let cloud_pct = samples
            .as_ref()
            .and_then(|s| s.first().and_then(|sample| sample.cloud_total_pct));
        let kp_value = kp.as_ref().map(|reading| reading.kp_index);
        let is_dark = darkness.map(|d| d.is_dark).unwrap_or(false);

        let score = chance_score(
            kp_value,
            cloud_pct,
            is_dark,
            weights.kp,
            weights.sky,
            weights.darkness,
        );

        Ok(EvaluationReport {
            kp: kp.map(|reading| KpSummary {
                value: reading.kp_index,
                observed_at: reading.time_tag,
            }),
            cloud_pct,
            forecast_hours: samples.as_ref().map(Vec::len).unwrap_or(0),
            darkness,
            score,
            label: score_label(score),
            minimum_kp: minimum_kp_for_latitude(location.latitude),
            oval_latitude_limit: kp_value.map(visible_latitude_limit),
            warnings,
            location,
        })
    }
}
