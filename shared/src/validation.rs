//! Validation helpers for user-supplied inputs

use std::sync::OnceLock;

use regex::Regex;

/// Conventional `local@domain.tld` shape: ASCII local part of
/// letters/digits/`._%+-`, domain of letters/digits/`.-`, alphabetic TLD of
/// at least two letters.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Validate email address syntax.
///
/// Purely syntactic: no MX/DNS lookup, no internationalized domains.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate a latitude in decimal degrees
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err("Latitude must be between -90 and 90")
    }
}

/// Validate a longitude in decimal degrees
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err("Longitude must be between -180 and 180")
    }
}

/// Validate an alert threshold against the Kp scale
pub fn validate_kp_threshold(threshold: f64) -> Result<(), &'static str> {
    if (0.0..=9.0).contains(&threshold) {
        Ok(())
    } else {
        Err("Kp threshold must be between 0 and 9")
    }
}

/// Validate a scoring weight.
///
/// Weights only need to be finite and non-negative; whether they sum to 1
/// is the caller's convention, not checked here.
pub fn validate_weight(weight: f64) -> Result<(), &'static str> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err("Weights must be finite and non-negative")
    }
}

/// Validate an alert cooldown duration
pub fn validate_cooldown_hours(hours: f64) -> Result<(), &'static str> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err("Cooldown hours must be finite and non-negative")
    }
}
