//! HTTP handlers for the Aurora Visibility Service

pub mod alerts;
pub mod darkness;
pub mod health;
pub mod locations;
pub mod space_weather;
pub mod visibility;
pub mod weather;

pub use alerts::*;
pub use darkness::*;
pub use health::*;
pub use locations::*;
pub use space_weather::*;
pub use visibility::*;
pub use weather::*;

use shared::validation::{validate_latitude, validate_longitude};

use crate::error::{AppError, AppResult};

/// Reject out-of-range coordinates before they reach an upstream call
pub(crate) fn require_valid_coordinates(lat: f64, lon: f64) -> AppResult<()> {
    validate_latitude(lat).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_longitude(lon).map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(())
}
