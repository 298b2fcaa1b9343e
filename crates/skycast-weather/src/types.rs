use serde::{Deserialize, Serialize};

/// Place the snapshot describes, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
}

/// Current conditions at the time of the fetch.
///
/// Temperatures and wind speed are rounded to whole units at the
/// normalization boundary; percentages are clamped to 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub humidity_pct: u8,
    pub wind_kph: i32,
    pub condition: String,
    pub icon_url: String,
    /// Observation time rendered for display.
    pub observed_at: String,
}

/// Sunrise/sunset for the current day, in the provider's local time format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Date rendered for display.
    pub date: String,
    pub max_temp_c: i32,
    pub min_temp_c: i32,
    pub condition: String,
    pub icon_url: String,
    pub chance_of_rain_pct: u8,
    pub avg_humidity_pct: u8,
}

/// A single point-in-time weather reading plus forecast.
///
/// Built once per successful fetch and replaces any prior snapshot
/// wholesale; there is no incremental merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub astro: Astro,
    /// Chronological, in the provider's day order. Never empty.
    pub forecast: Vec<ForecastDay>,
}

/// A derived warning message. Carries no identity beyond its content and
/// is recomputed from scratch on every snapshot change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub title: String,
    pub description: String,
}
