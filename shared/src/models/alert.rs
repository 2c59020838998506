//! Alert session state and dispatch context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreLabel;

/// Per-session alert history, owned by the caller
///
/// The decision rule only reads this; the caller updates it after a
/// successful dispatch. One session's history never affects another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertState {
    #[serde(default)]
    pub last_alert: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_count: u32,
}

/// Scalar values handed to the dispatch collaborator for embedding
///
/// Message formatting and SMTP transport live outside this system; this is
/// everything they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertContext {
    pub kp: f64,
    pub score: f64,
    pub label: ScoreLabel,
    pub cloud_pct: Option<f64>,
    pub is_dark: bool,
    pub location_name: String,
    /// Smallest Kp at which the auroral oval reaches the location's latitude
    pub minimum_kp: Option<u8>,
}
