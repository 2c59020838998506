//! Aurora visibility scoring
//!
//! Combines geomagnetic activity, sky clarity, and darkness into a single
//! chance score, plus the latitude reach of the auroral oval per Kp step.

use serde::{Deserialize, Serialize};

/// Default weight for the geomagnetic (Kp) component
pub const DEFAULT_KP_WEIGHT: f64 = 0.5;

/// Default weight for the clear-sky component
pub const DEFAULT_SKY_WEIGHT: f64 = 0.35;

/// Default weight for the darkness component
pub const DEFAULT_DARKNESS_WEIGHT: f64 = 0.15;

/// Qualitative bands for the chance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreLabel::Low => write!(f, "Low"),
            ScoreLabel::Moderate => write!(f, "Moderate"),
            ScoreLabel::High => write!(f, "High"),
        }
    }
}

/// Compute the aurora chance score, rounded to two decimals.
///
/// Returns exactly 0.0 when the Kp index or the cloud cover is unknown:
/// missing inputs mean "nothing to report", not an error, so composite
/// dashboards never fail on a gap in one feed.
///
/// Kp is normalized against the top of its 0-9 scale and capped at 1;
/// cloud cover is inverted into a clear-sky fraction clamped to [0, 1].
/// The weighted sum itself is NOT clamped: weights conventionally sum to 1,
/// but that is the caller's convention, and larger weights produce scores
/// above 1.
pub fn chance_score(
    kp: Option<f64>,
    cloud_pct: Option<f64>,
    is_dark: bool,
    w_kp: f64,
    w_sky: f64,
    w_dark: f64,
) -> f64 {
    let (Some(kp), Some(cloud_pct)) = (kp, cloud_pct) else {
        return 0.0;
    };

    let kp_norm = (kp / 9.0).min(1.0);
    let sky_norm = ((100.0 - cloud_pct) / 100.0).clamp(0.0, 1.0);
    let dark = if is_dark { 1.0 } else { 0.0 };

    let raw = w_kp * kp_norm + w_sky * sky_norm + w_dark * dark;
    (raw * 100.0).round() / 100.0
}

/// Band a score into Low / Moderate / High.
///
/// Band lower bounds are inclusive: 0.4 is already Moderate, 0.7 already
/// High.
pub fn score_label(score: f64) -> ScoreLabel {
    if score < 0.4 {
        ScoreLabel::Low
    } else if score < 0.7 {
        ScoreLabel::Moderate
    } else {
        ScoreLabel::High
    }
}

// ============================================================================
// Auroral oval reach
// ============================================================================

/// Southern visible-latitude limit (degrees north) per whole Kp step
///
/// The rule-of-thumb table used by the dashboard map: at Kp 5 the oval
/// reaches about 56.3°N, at Kp 9 about 48.1°N.
pub const KP_VISIBILITY_ZONES: [(u8, f64); 10] = [
    (0, 66.5),
    (1, 64.5),
    (2, 62.4),
    (3, 60.4),
    (4, 58.3),
    (5, 56.3),
    (6, 54.2),
    (7, 52.2),
    (8, 50.1),
    (9, 48.1),
];

/// Equatorward latitude limit for a Kp value, rounded to the nearest step
pub fn visible_latitude_limit(kp: f64) -> f64 {
    let step = kp.round().clamp(0.0, 9.0) as usize;
    KP_VISIBILITY_ZONES[step].1
}

/// Smallest Kp whose auroral oval reaches the given latitude.
///
/// Works on the absolute latitude so southern-hemisphere sites behave the
/// same. None when even Kp 9 does not reach the site.
pub fn minimum_kp_for_latitude(latitude: f64) -> Option<u8> {
    let lat = latitude.abs();
    KP_VISIBILITY_ZONES
        .iter()
        .find(|(_, limit)| *limit <= lat)
        .map(|(kp, _)| *kp)
}
