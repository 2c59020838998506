//! Darkness service
//!
//! No cache here: solar times shift every day and the call is cheap, so
//! each request evaluates fresh against the injected clock.

use std::sync::Arc;

use shared::cache::Clock;
use shared::models::DarknessState;

use crate::error::AppResult;
use crate::external::SunriseSunsetClient;

/// Day/night evaluation for a location
#[derive(Clone)]
pub struct DarknessService {
    client: SunriseSunsetClient,
    clock: Arc<dyn Clock>,
}

impl DarknessService {
    pub fn new(client: SunriseSunsetClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    /// Evaluate darkness at the current instant
    pub async fn state(&self, latitude: f64, longitude: f64) -> AppResult<DarknessState> {
        self.client
            .darkness(latitude, longitude, self.clock.now())
            .await
    }
}
