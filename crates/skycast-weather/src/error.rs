//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Malformed provider response at {field}")]
    MalformedResponse { field: String },

    #[error("Provider returned an empty forecast")]
    EmptyForecast,

    #[error("Location not found")]
    LocationNotFound,

    #[error("Provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MalformedResponse { .. } | Self::EmptyForecast => {
                "Received unexpected weather data. Please try again."
            }
            Self::LocationNotFound => "Location not found",
            Self::Provider { .. } => "Failed to fetch weather data. Please try again.",
            Self::Network(_) => "Network error. Check your connection.",
        }
    }
}

/// Shorthand for a [`WeatherError::MalformedResponse`] naming a field path.
pub(crate) fn malformed(field: &str) -> WeatherError {
    WeatherError::MalformedResponse {
        field: field.to_string(),
    }
}
