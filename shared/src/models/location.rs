//! Resolved place locations

use serde::{Deserialize, Serialize};

/// A geocoded place, immutable once resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Empty when the geocoder does not report a country
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA time zone identifier, e.g. "Europe/Oslo"
    pub timezone: String,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
            timezone: timezone.into(),
        }
    }
}

/// Well-known aurora watching spots offered as quick picks
pub fn preset_locations() -> Vec<Location> {
    vec![
        Location::new("Tromsø", "Norway", 69.6492, 18.9553, "Europe/Oslo"),
        Location::new("Abisko", "Sweden", 68.3495, 18.8310, "Europe/Stockholm"),
        Location::new("Rovaniemi", "Finland", 66.5039, 25.7294, "Europe/Helsinki"),
        Location::new("Reykjavík", "Iceland", 64.1466, -21.9426, "Atlantic/Reykjavik"),
        Location::new("Fairbanks", "United States", 64.8378, -147.7164, "America/Anchorage"),
        Location::new("Yellowknife", "Canada", 62.4540, -114.3718, "America/Yellowknife"),
    ]
}
