//! Plain-text weather summary for the share/copy action. The share sheet
//! and clipboard are the UI's concern; only the text itself is built here.

use skycast_weather::WeatherSnapshot;

/// Render a snapshot as a shareable multi-line summary.
pub fn share_text(snapshot: &WeatherSnapshot) -> String {
    format!(
        "Weather in {} - {}:\n\
         \u{1F321}\u{FE0F} Temperature: {}\u{B0}C\n\
         \u{1F4A7} Humidity: {}%\n\
         \u{1F4A8} Wind: {} km/h\n\
         \u{1F325}\u{FE0F} Condition: {}\n\
         Source: Skycast",
        snapshot.location.city,
        snapshot.location.region,
        snapshot.current.temperature_c,
        snapshot.current.humidity_pct,
        snapshot.current.wind_kph,
        snapshot.current.condition,
    )
}
