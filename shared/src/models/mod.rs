//! Domain models for the Aurora Visibility Service

mod alert;
mod darkness;
mod location;
mod space_weather;
mod weather;

pub use alert::*;
pub use darkness::*;
pub use location::*;
pub use space_weather::*;
pub use weather::*;
