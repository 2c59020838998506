//! Shared domain logic for the Aurora Visibility Service
//!
//! This crate contains the types, scoring rules, alert decision logic, and
//! freshness cache shared between the backend service and its tests. It is
//! pure computation: no async, no HTTP, no global state.

pub mod alerting;
pub mod cache;
pub mod models;
pub mod scoring;
pub mod validation;

pub use alerting::*;
pub use cache::*;
pub use models::*;
pub use scoring::*;
pub use validation::*;
