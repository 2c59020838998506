//! Location service: geocoding and quick-pick presets

use shared::models::{preset_locations, Location};

use crate::error::AppResult;
use crate::external::OpenMeteoClient;

/// Place resolution
#[derive(Clone)]
pub struct LocationService {
    client: OpenMeteoClient,
}

impl LocationService {
    pub fn new(client: OpenMeteoClient) -> Self {
        Self { client }
    }

    /// Resolve a place name; absent means "no such place", not an error
    pub async fn geocode(&self, name: &str) -> AppResult<Option<Location>> {
        self.client.geocode(name).await
    }

    /// Well-known aurora watching spots
    pub fn presets(&self) -> Vec<Location> {
        preset_locations()
    }
}
