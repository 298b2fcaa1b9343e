//! Alert deriver: threshold checks over a [`WeatherSnapshot`] producing an
//! ordered list of advisories.
//!
//! The output order is fixed (temperature, rain, humidity, wind) because it
//! determines on-screen stacking. Derivation is pure and deterministic;
//! callers recompute the whole list whenever the snapshot changes.

use crate::types::{Advisory, WeatherSnapshot};

/// Current temperature above this fires the heat advisory (exclusive).
const HEAT_THRESHOLD_C: i32 = 35;
/// Current temperature below this fires the cold advisory (exclusive).
const COLD_THRESHOLD_C: i32 = 10;
/// Rain chance above this marks a forecast day as a rain risk (exclusive).
const RAIN_CHANCE_THRESHOLD_PCT: u8 = 80;
/// Humidity above this fires the high-humidity advisory (exclusive).
const HIGH_HUMIDITY_THRESHOLD_PCT: u8 = 90;
/// Humidity below this fires the low-humidity advisory (exclusive).
const LOW_HUMIDITY_THRESHOLD_PCT: u8 = 30;
/// Wind speed above this fires the wind advisory (exclusive).
const WIND_THRESHOLD_KPH: i32 = 50;

/// Temperature classification. Heat and cold advisories are mutually
/// exclusive; the band makes that an invariant of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Hot,
    Normal,
    Cold,
}

impl TemperatureBand {
    pub fn classify(temperature_c: i32) -> Self {
        if temperature_c > HEAT_THRESHOLD_C {
            Self::Hot
        } else if temperature_c < COLD_THRESHOLD_C {
            Self::Cold
        } else {
            Self::Normal
        }
    }
}

/// Humidity classification, same exclusivity scheme as the temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityBand {
    High,
    Normal,
    Low,
}

impl HumidityBand {
    pub fn classify(humidity_pct: u8) -> Self {
        if humidity_pct > HIGH_HUMIDITY_THRESHOLD_PCT {
            Self::High
        } else if humidity_pct < LOW_HUMIDITY_THRESHOLD_PCT {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

/// Derive the advisory list for a snapshot.
pub fn derive_advisories(snapshot: &WeatherSnapshot) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    match TemperatureBand::classify(snapshot.current.temperature_c) {
        TemperatureBand::Hot => advisories.push(Advisory {
            title: "Extreme Heat".to_string(),
            description: "Very high temperature. Stay hydrated and avoid prolonged sun exposure."
                .to_string(),
        }),
        TemperatureBand::Cold => advisories.push(Advisory {
            title: "Low Temperature".to_string(),
            description: "Very low temperature. Stay warm and protected.".to_string(),
        }),
        TemperatureBand::Normal => {}
    }

    // All qualifying days fold into a single advisory, in forecast order.
    let rainy_dates: Vec<&str> = snapshot
        .forecast
        .iter()
        .filter(|day| day.chance_of_rain_pct > RAIN_CHANCE_THRESHOLD_PCT)
        .map(|day| day.date.as_str())
        .collect();
    if !rainy_dates.is_empty() {
        advisories.push(Advisory {
            title: "Rain Alert".to_string(),
            description: format!(
                "High chance of rain in the coming days: {}",
                rainy_dates.join(", ")
            ),
        });
    }

    match HumidityBand::classify(snapshot.current.humidity_pct) {
        HumidityBand::High => advisories.push(Advisory {
            title: "High Humidity".to_string(),
            description: "Very high humidity levels. Watch out for mold and respiratory issues."
                .to_string(),
        }),
        HumidityBand::Low => advisories.push(Advisory {
            title: "Low Humidity".to_string(),
            description:
                "Very low humidity levels. Stay hydrated and use a humidifier if possible."
                    .to_string(),
        }),
        HumidityBand::Normal => {}
    }

    if snapshot.current.wind_kph > WIND_THRESHOLD_KPH {
        advisories.push(Advisory {
            title: "Strong Winds".to_string(),
            description:
                "High wind speed. Avoid outdoor activities and watch for loose objects."
                    .to_string(),
        });
    }

    advisories
}
