//! Weather data models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One hourly sample of the sky forecast
///
/// Times are in the location's own time zone, exactly as reported upstream.
/// Every value is optional: the feed leaves gaps and a missing value stays
/// missing rather than defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub time: NaiveDateTime,
    pub cloud_total_pct: Option<f64>,
    pub cloud_low_pct: Option<f64>,
    pub cloud_mid_pct: Option<f64>,
    pub cloud_high_pct: Option<f64>,
    pub temp_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub rh_pct: Option<f64>,
    /// Horizontal visibility in kilometres (upstream reports metres)
    pub visibility_km: Option<f64>,
    pub wind_ms: Option<f64>,
    pub gust_ms: Option<f64>,
    pub precip_mm: Option<f64>,
    pub precip_prob_pct: Option<f64>,
}

/// Current weather snapshot for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub temp_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<i32>,
    pub cloud_pct: Option<i32>,
    pub wind_ms: Option<f64>,
    pub pressure_hpa: Option<i32>,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
}

/// Outcome of a current-conditions lookup
///
/// A rate-limited upstream answer is a value, not a failure: it is cached
/// like any other result, so repeated requests back off for the full
/// validity window instead of hammering the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentConditionsResult {
    Ok { conditions: CurrentConditions },
    RateLimited { message: String },
}

impl CurrentConditionsResult {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CurrentConditionsResult::RateLimited { .. })
    }
}
