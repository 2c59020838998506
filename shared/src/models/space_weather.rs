//! Geomagnetic activity models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single planetary Kp index reading
///
/// Readings come from the upstream feed already ordered by time; entries
/// whose index could not be parsed are dropped before they reach this type,
/// never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeomagneticReading {
    /// Observation time in UTC
    pub time_tag: DateTime<Utc>,
    /// Planetary Kp index, 0-9, fractional values allowed
    pub kp_index: f64,
}

impl GeomagneticReading {
    pub fn new(time_tag: DateTime<Utc>, kp_index: f64) -> Self {
        Self { time_tag, kp_index }
    }
}

/// Sort readings ascending by time and keep only the trailing window.
///
/// The window is measured backwards from `now`; a reading exactly on the
/// cutoff is kept.
pub fn trailing_window(
    mut readings: Vec<GeomagneticReading>,
    window_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<GeomagneticReading> {
    readings.sort_by_key(|r| r.time_tag);
    let cutoff = now - chrono::Duration::minutes(window_minutes);
    readings.retain(|r| r.time_tag >= cutoff);
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_trailing_window_sorts_ascending() {
        let readings = vec![
            GeomagneticReading::new(at(30), 3.0),
            GeomagneticReading::new(at(10), 2.0),
            GeomagneticReading::new(at(20), 4.0),
        ];

        let windowed = trailing_window(readings, 240, at(40));
        let times: Vec<_> = windowed.iter().map(|r| r.time_tag).collect();
        assert_eq!(times, vec![at(10), at(20), at(30)]);
    }

    #[test]
    fn test_trailing_window_drops_old_entries() {
        let readings = vec![
            GeomagneticReading::new(at(0), 1.0),
            GeomagneticReading::new(at(25), 2.0),
            GeomagneticReading::new(at(50), 3.0),
        ];

        let windowed = trailing_window(readings, 30, at(55));
        assert_eq!(windowed.len(), 2);
        assert_eq!(windowed[0].time_tag, at(25));
        assert_eq!(windowed[1].time_tag, at(50));
    }

    #[test]
    fn test_trailing_window_cutoff_is_inclusive() {
        let readings = vec![GeomagneticReading::new(at(10), 2.0)];

        // Exactly window_minutes old: still inside the window.
        let windowed = trailing_window(readings, 30, at(40));
        assert_eq!(windowed.len(), 1);
    }

    #[test]
    fn test_trailing_window_empty_input() {
        let windowed = trailing_window(Vec::new(), 240, at(0));
        assert!(windowed.is_empty());
    }
}
