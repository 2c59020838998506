//! Orchestration services for the Aurora Visibility Service

pub mod alerts;
pub mod darkness;
pub mod evaluation;
pub mod location;
pub mod space_weather;
pub mod weather;

pub use alerts::AlertService;
pub use darkness::DarknessService;
pub use evaluation::EvaluationService;
pub use location::LocationService;
pub use space_weather::SpaceWeatherService;
pub use weather::WeatherService;
