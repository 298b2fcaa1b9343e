//! Weather data core for Skycast
//!
//! Fetches forecasts from WeatherAPI.com, normalizes the raw payload into
//! a [`WeatherSnapshot`], and derives threshold-based advisories from it.

pub mod alerts;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod types;

pub use alerts::derive_advisories;
pub use error::WeatherError;
pub use provider::WeatherProvider;
pub use types::*;
