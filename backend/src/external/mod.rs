//! External API integrations

pub mod open_meteo;
pub mod openweather;
pub mod sunrise_sunset;
pub mod swpc;

pub use open_meteo::OpenMeteoClient;
pub use openweather::OpenWeatherClient;
pub use sunrise_sunset::SunriseSunsetClient;
pub use swpc::SwpcClient;
