//! Day/night state for a location

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the sky is dark at a location right now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DarknessState {
    pub is_dark: bool,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl DarknessState {
    /// Evaluate darkness by strict comparison against the solar day.
    ///
    /// Comparisons happen in UTC regardless of the location's zone: dark
    /// strictly before sunrise or strictly after sunset. The boundary
    /// instants themselves count as daylight.
    pub fn evaluate(sunrise: DateTime<Utc>, sunset: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            is_dark: now < sunrise || now > sunset,
            sunrise,
            sunset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_dark_before_sunrise() {
        let state = DarknessState::evaluate(utc(6, 30), utc(18, 15), utc(4, 0));
        assert!(state.is_dark);
    }

    #[test]
    fn test_light_during_day() {
        let state = DarknessState::evaluate(utc(6, 30), utc(18, 15), utc(12, 0));
        assert!(!state.is_dark);
    }

    #[test]
    fn test_dark_after_sunset() {
        let state = DarknessState::evaluate(utc(6, 30), utc(18, 15), utc(22, 0));
        assert!(state.is_dark);
    }

    #[test]
    fn test_boundary_instants_are_daylight() {
        // Strict comparisons: exactly sunrise / sunset is not dark.
        let at_sunrise = DarknessState::evaluate(utc(6, 30), utc(18, 15), utc(6, 30));
        assert!(!at_sunrise.is_dark);

        let at_sunset = DarknessState::evaluate(utc(6, 30), utc(18, 15), utc(18, 15));
        assert!(!at_sunset.is_dark);
    }
}
