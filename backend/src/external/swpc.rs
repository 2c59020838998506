//! NOAA SWPC client for the planetary Kp index
//!
//! Two feeds are involved: the products table (a JSON array of rows whose
//! first row is the column header, all cells strings) for the current value,
//! and the 1-minute series (an array of objects) for the trailing window.
//! The 1-minute feed occasionally carries nulls or numeric strings in
//! `kp_index`, so cells are coerced rather than trusted.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use shared::models::{trailing_window, GeomagneticReading};

use crate::error::{AppError, AppResult};

const SERVICE: &str = "NOAA space weather feed";

/// Products table holding the current Kp in its last row
const PLANETARY_K_INDEX_PATH: &str = "/products/noaa-planetary-k-index.json";

/// 1-minute estimated Kp series
const KP_SERIES_PATH: &str = "/json/planetary_k_index_1m.json";

/// NOAA SWPC API client
#[derive(Clone)]
pub struct SwpcClient {
    client: Client,
    base_url: String,
}

/// One row of the 1-minute series feed
#[derive(Debug, Deserialize)]
struct KpSeriesRow {
    time_tag: String,
    #[serde(default)]
    kp_index: Option<Value>,
}

impl SwpcClient {
    /// Create a client against the production endpoints
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, "https://services.swpc.noaa.gov".to_string())
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch the most recent planetary Kp reading.
    ///
    /// The reading is the last data row of the products table, taken as
    /// published with no interpolation.
    pub async fn current_kp(&self) -> AppResult<GeomagneticReading> {
        let url = format!("{}{}", self.base_url, PLANETARY_K_INDEX_PATH);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Kp product request failed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        if !response.status().is_success() {
            tracing::error!("Kp product returned {}", response.status());
            return Err(AppError::UpstreamUnavailable { service: SERVICE });
        }

        let rows: Vec<Vec<Value>> = response.json().await.map_err(|e| {
            tracing::error!("Kp product payload malformed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        latest_reading(&rows).ok_or(AppError::UpstreamUnavailable { service: SERVICE })
    }

    /// Fetch the trailing Kp series.
    ///
    /// Rows with an unparsable timestamp or a non-numeric index are
    /// dropped; the remainder is sorted ascending and clipped to
    /// `window_minutes` before `now`.
    pub async fn kp_series(
        &self,
        window_minutes: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<GeomagneticReading>> {
        let url = format!("{}{}", self.base_url, KP_SERIES_PATH);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Kp series request failed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        if !response.status().is_success() {
            tracing::error!("Kp series returned {}", response.status());
            return Err(AppError::UpstreamUnavailable { service: SERVICE });
        }

        let rows: Vec<KpSeriesRow> = response.json().await.map_err(|e| {
            tracing::error!("Kp series payload malformed: {}", e);
            AppError::UpstreamUnavailable { service: SERVICE }
        })?;

        Ok(normalize_series(rows, window_minutes, now))
    }
}

/// Pull the last data row of the products table into a reading
fn latest_reading(rows: &[Vec<Value>]) -> Option<GeomagneticReading> {
    // The first row is the column header.
    let last = rows.iter().skip(1).last()?;
    let time_tag = parse_swpc_timestamp(last.first()?.as_str()?)?;
    let kp_index = coerce_f64(last.get(1)?)?;
    Some(GeomagneticReading::new(time_tag, kp_index))
}

/// Drop unparsable rows, then sort and clip to the trailing window
fn normalize_series(
    rows: Vec<KpSeriesRow>,
    window_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<GeomagneticReading> {
    let readings = rows
        .into_iter()
        .filter_map(|row| {
            let time_tag = parse_swpc_timestamp(&row.time_tag)?;
            let kp_index = row.kp_index.as_ref().and_then(coerce_f64)?;
            Some(GeomagneticReading::new(time_tag, kp_index))
        })
        .collect();

    trailing_window(readings, window_minutes, now)
}

/// Interpret a JSON cell as a number, accepting numeric strings
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse the timestamp formats the SWPC feeds use
fn parse_swpc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_latest_reading_takes_last_data_row() {
        let rows: Vec<Vec<Value>> = serde_json::from_value(json!([
            ["time_tag", "Kp", "a_running", "station_count"],
            ["2024-11-05 18:00:00.000", "2.33", "9", "8"],
            ["2024-11-05 21:00:00.000", "4.67", "18", "8"]
        ]))
        .unwrap();

        let reading = latest_reading(&rows).unwrap();
        assert_eq!(reading.time_tag, utc(2024, 11, 5, 21, 0, 0));
        assert!((reading.kp_index - 4.67).abs() < 1e-9);
    }

    #[test]
    fn test_latest_reading_rejects_header_only_table() {
        let rows: Vec<Vec<Value>> = serde_json::from_value(json!([
            ["time_tag", "Kp", "a_running", "station_count"]
        ]))
        .unwrap();

        assert!(latest_reading(&rows).is_none());
    }

    #[test]
    fn test_latest_reading_rejects_garbage_kp_cell() {
        let rows: Vec<Vec<Value>> = serde_json::from_value(json!([
            ["time_tag", "Kp"],
            ["2024-11-05 21:00:00.000", "unavailable"]
        ]))
        .unwrap();

        assert!(latest_reading(&rows).is_none());
    }

    #[test]
    fn test_normalize_series_drops_null_and_bad_rows() {
        let rows: Vec<KpSeriesRow> = serde_json::from_value(json!([
            {"time_tag": "2024-11-05T20:58:00", "kp_index": 3.67},
            {"time_tag": "2024-11-05T20:59:00", "kp_index": null},
            {"time_tag": "not a timestamp", "kp_index": 4.0},
            {"time_tag": "2024-11-05T21:00:00", "kp_index": "4.33"}
        ]))
        .unwrap();

        let series = normalize_series(rows, 240, utc(2024, 11, 5, 21, 0, 0));
        assert_eq!(series.len(), 2);
        assert!((series[0].kp_index - 3.67).abs() < 1e-9);
        assert!((series[1].kp_index - 4.33).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_series_sorts_and_clips_to_window() {
        let rows: Vec<KpSeriesRow> = serde_json::from_value(json!([
            {"time_tag": "2024-11-05T20:00:00", "kp_index": 5.0},
            {"time_tag": "2024-11-05T16:59:00", "kp_index": 2.0},
            {"time_tag": "2024-11-05T17:00:00", "kp_index": 3.0}
        ]))
        .unwrap();

        let series = normalize_series(rows, 240, utc(2024, 11, 5, 21, 0, 0));
        // The 16:59 row sits outside the 240-minute window; 17:00 is on the
        // cutoff and stays.
        assert_eq!(series.len(), 2);
        assert!((series[0].kp_index - 3.0).abs() < 1e-9);
        assert!((series[1].kp_index - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_coerce_f64_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_f64(&json!(4.33)), Some(4.33));
        assert_eq!(coerce_f64(&json!(7)), Some(7.0));
        assert_eq!(coerce_f64(&json!("4.33")), Some(4.33));
        assert_eq!(coerce_f64(&json!(" 2.67 ")), Some(2.67));
        assert_eq!(coerce_f64(&json!("n/a")), None);
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!([1.0])), None);
    }

    #[test]
    fn test_parse_swpc_timestamp_formats() {
        let expected = utc(2024, 11, 5, 21, 0, 0);
        assert_eq!(parse_swpc_timestamp("2024-11-05T21:00:00Z"), Some(expected));
        assert_eq!(parse_swpc_timestamp("2024-11-05T21:00:00"), Some(expected));
        assert_eq!(
            parse_swpc_timestamp("2024-11-05 21:00:00.000"),
            Some(expected)
        );
        assert_eq!(parse_swpc_timestamp("2024-11-05 21:00:00"), Some(expected));
        assert_eq!(parse_swpc_timestamp("yesterday"), None);
    }
}
