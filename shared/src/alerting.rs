//! Alert dispatch decision rule
//!
//! Decides whether a Kp reading warrants a notification, respecting the
//! per-session cooldown. The caller owns the alert history (see
//! [`crate::models::AlertState`]) and passes the clock reading in, so the
//! rule is a pure function and cooldowns are testable without waiting.

use chrono::{DateTime, Utc};

/// Decide whether to send an aurora alert.
///
/// Never alerts on a missing Kp or one strictly below the threshold
/// (exactly the threshold passes). The first qualifying reading always
/// alerts; afterwards the elapsed time since the last alert must reach the
/// cooldown, boundary inclusive.
pub fn should_send_alert(
    kp: Option<f64>,
    kp_threshold: f64,
    last_alert: Option<DateTime<Utc>>,
    cooldown_hours: f64,
    now: DateTime<Utc>,
) -> bool {
    let Some(kp) = kp else {
        return false;
    };
    if kp < kp_threshold {
        return false;
    }

    match last_alert {
        None => true,
        Some(last) => elapsed_hours(last, now) >= cooldown_hours,
    }
}

/// Hours left before the cooldown allows another alert, floored at zero.
///
/// None when no alert has been sent yet: there is nothing to wait out.
pub fn cooldown_remaining_hours(
    last_alert: Option<DateTime<Utc>>,
    cooldown_hours: f64,
    now: DateTime<Utc>,
) -> Option<f64> {
    last_alert.map(|last| (cooldown_hours - elapsed_hours(last, now)).max(0.0))
}

fn elapsed_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}
