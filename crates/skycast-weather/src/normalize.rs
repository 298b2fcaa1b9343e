//! Normalizer: maps a raw WeatherAPI.com `forecast.json` payload into a
//! canonical [`WeatherSnapshot`].
//!
//! The payload is walked as a [`serde_json::Value`] so that a missing or
//! mis-shaped field can be reported by its exact path (e.g.
//! `current.temp_c`). Normalization is all-or-nothing: no partial snapshot
//! is ever returned.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::{malformed, WeatherError};
use crate::types::{
    Astro, CurrentConditions, ForecastDay, Location, WeatherSnapshot,
};

/// Provider timestamp format for `current.last_updated`.
const OBSERVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Provider date format for `forecastday[].date`.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display formats shown to the user.
const OBSERVED_AT_DISPLAY: &str = "%d/%m/%Y %H:%M";
const DATE_DISPLAY: &str = "%d/%m/%Y";

/// Build a [`WeatherSnapshot`] from a raw provider payload.
pub fn snapshot(raw: &Value) -> Result<WeatherSnapshot, WeatherError> {
    let location = Location {
        city: nonempty_text(raw, "location.name", "location.name")?,
        region: nonempty_text(raw, "location.region", "location.region")?,
        country: nonempty_text(raw, "location.country", "location.country")?,
    };

    let current = CurrentConditions {
        temperature_c: rounded(raw, "current.temp_c", "current.temp_c")?,
        feels_like_c: rounded(raw, "current.feelslike_c", "current.feelslike_c")?,
        humidity_pct: percentage(raw, "current.humidity", "current.humidity")?,
        wind_kph: rounded(raw, "current.wind_kph", "current.wind_kph")?,
        condition: text(raw, "current.condition.text", "current.condition.text")?,
        icon_url: ensure_scheme(&text(
            raw,
            "current.condition.icon",
            "current.condition.icon",
        )?),
        observed_at: display_datetime(&text(
            raw,
            "current.last_updated",
            "current.last_updated",
        )?)
        .ok_or_else(|| malformed("current.last_updated"))?,
    };

    let days = walk(raw, "forecast.forecastday", "forecast.forecastday")?
        .as_array()
        .ok_or_else(|| malformed("forecast.forecastday"))?;
    if days.is_empty() {
        return Err(WeatherError::EmptyForecast);
    }

    // Astro for the dashboard comes from the first forecast day only.
    let astro = Astro {
        sunrise: text(
            &days[0],
            "astro.sunrise",
            "forecast.forecastday[0].astro.sunrise",
        )?,
        sunset: text(
            &days[0],
            "astro.sunset",
            "forecast.forecastday[0].astro.sunset",
        )?,
    };

    // Provider order is assumed chronological ascending and is preserved
    // as-is; the normalizer never re-sorts.
    let forecast = days
        .iter()
        .enumerate()
        .map(|(i, day)| forecast_day(day, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeatherSnapshot {
        location,
        current,
        astro,
        forecast,
    })
}

fn forecast_day(day: &Value, index: usize) -> Result<ForecastDay, WeatherError> {
    let at = |rel: &str| format!("forecast.forecastday[{index}].{rel}");

    let date_raw = text(day, "date", &at("date"))?;
    let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT)
        .map_err(|_| malformed(&at("date")))?
        .format(DATE_DISPLAY)
        .to_string();

    Ok(ForecastDay {
        date,
        max_temp_c: rounded(day, "day.maxtemp_c", &at("day.maxtemp_c"))?,
        min_temp_c: rounded(day, "day.mintemp_c", &at("day.mintemp_c"))?,
        condition: text(day, "day.condition.text", &at("day.condition.text"))?,
        icon_url: ensure_scheme(&text(
            day,
            "day.condition.icon",
            &at("day.condition.icon"),
        )?),
        chance_of_rain_pct: percentage(
            day,
            "day.daily_chance_of_rain",
            &at("day.daily_chance_of_rain"),
        )?,
        avg_humidity_pct: percentage(day, "day.avghumidity", &at("day.avghumidity"))?,
    })
}

/// Render a provider `last_updated` timestamp for display.
fn display_datetime(raw: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw, OBSERVED_AT_FORMAT).ok()?;
    Some(parsed.format(OBSERVED_AT_DISPLAY).to_string())
}

/// Ensure an icon URL carries a scheme. WeatherAPI returns
/// protocol-relative URLs (`//cdn.weatherapi.com/...`).
fn ensure_scheme(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{rest}")
    } else if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Walk a dotted path relative to `value`, reporting `label` on failure.
fn walk<'a>(value: &'a Value, rel: &str, label: &str) -> Result<&'a Value, WeatherError> {
    let mut current = value;
    for part in rel.split('.') {
        current = current.get(part).ok_or_else(|| malformed(label))?;
    }
    Ok(current)
}

fn number(value: &Value, rel: &str, label: &str) -> Result<f64, WeatherError> {
    walk(value, rel, label)?
        .as_f64()
        .ok_or_else(|| malformed(label))
}

/// Numeric field rounded to the nearest integer at the boundary.
fn rounded(value: &Value, rel: &str, label: &str) -> Result<i32, WeatherError> {
    Ok(number(value, rel, label)?.round() as i32)
}

/// Percentage field: passed through unrounded, clamped to 0-100.
fn percentage(value: &Value, rel: &str, label: &str) -> Result<u8, WeatherError> {
    Ok(number(value, rel, label)?.clamp(0.0, 100.0) as u8)
}

fn text(value: &Value, rel: &str, label: &str) -> Result<String, WeatherError> {
    Ok(walk(value, rel, label)?
        .as_str()
        .ok_or_else(|| malformed(label))?
        .to_string())
}

fn nonempty_text(value: &Value, rel: &str, label: &str) -> Result<String, WeatherError> {
    let s = text(value, rel, label)?;
    if s.is_empty() {
        return Err(malformed(label));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "location": {
                "name": "Lisbon",
                "region": "Lisboa",
                "country": "Portugal"
            },
            "current": {
                "temp_c": 21.4,
                "feelslike_c": 20.6,
                "humidity": 65,
                "wind_kph": 14.8,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png"
                },
                "last_updated": "2024-03-15 14:30"
            },
            "forecast": {
                "forecastday": [
                    {
                        "date": "2024-03-15",
                        "astro": { "sunrise": "06:42 AM", "sunset": "06:38 PM" },
                        "day": {
                            "maxtemp_c": 22.7,
                            "mintemp_c": 13.2,
                            "condition": {
                                "text": "Sunny",
                                "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png"
                            },
                            "daily_chance_of_rain": 10,
                            "avghumidity": 60
                        }
                    },
                    {
                        "date": "2024-03-16",
                        "astro": { "sunrise": "06:40 AM", "sunset": "06:39 PM" },
                        "day": {
                            "maxtemp_c": 19.1,
                            "mintemp_c": 12.8,
                            "condition": {
                                "text": "Moderate rain",
                                "icon": "//cdn.weatherapi.com/weather/64x64/day/302.png"
                            },
                            "daily_chance_of_rain": 95,
                            "avghumidity": 82
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn test_snapshot_happy_path() {
        let snap = snapshot(&sample_payload()).unwrap();

        assert_eq!(snap.location.city, "Lisbon");
        assert_eq!(snap.location.region, "Lisboa");
        assert_eq!(snap.location.country, "Portugal");

        assert_eq!(snap.current.temperature_c, 21);
        assert_eq!(snap.current.feels_like_c, 21);
        assert_eq!(snap.current.humidity_pct, 65);
        assert_eq!(snap.current.wind_kph, 15);
        assert_eq!(snap.current.condition, "Partly cloudy");
        assert_eq!(snap.current.observed_at, "15/03/2024 14:30");

        assert_eq!(snap.astro.sunrise, "06:42 AM");
        assert_eq!(snap.astro.sunset, "06:38 PM");

        assert_eq!(snap.forecast.len(), 2);
        assert_eq!(snap.forecast[0].date, "15/03/2024");
        assert_eq!(snap.forecast[0].max_temp_c, 23);
        assert_eq!(snap.forecast[0].min_temp_c, 13);
        assert_eq!(snap.forecast[1].chance_of_rain_pct, 95);
        assert_eq!(snap.forecast[1].avg_humidity_pct, 82);
    }

    #[test]
    fn test_forecast_order_preserved() {
        let snap = snapshot(&sample_payload()).unwrap();
        let dates: Vec<&str> = snap.forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["15/03/2024", "16/03/2024"]);
    }

    #[test]
    fn test_icon_scheme_normalization() {
        let snap = snapshot(&sample_payload()).unwrap();
        assert_eq!(
            snap.current.icon_url,
            "https://cdn.weatherapi.com/weather/64x64/day/116.png"
        );

        assert_eq!(ensure_scheme("http://x/y.png"), "http://x/y.png");
        assert_eq!(ensure_scheme("cdn.example.com/y.png"), "https://cdn.example.com/y.png");
    }

    #[test]
    fn test_empty_forecast() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"] = json!([]);
        let err = snapshot(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::EmptyForecast));
    }

    #[test]
    fn test_non_numeric_temp() {
        let mut payload = sample_payload();
        payload["current"]["temp_c"] = json!("hot");
        let err = snapshot(&payload).unwrap_err();
        match err {
            WeatherError::MalformedResponse { field } => {
                assert_eq!(field, "current.temp_c");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_location_field() {
        let mut payload = sample_payload();
        payload["location"]
            .as_object_mut()
            .unwrap()
            .remove("region");
        let err = snapshot(&payload).unwrap_err();
        match err {
            WeatherError::MalformedResponse { field } => {
                assert_eq!(field, "location.region");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_city_rejected() {
        let mut payload = sample_payload();
        payload["location"]["name"] = json!("");
        let err = snapshot(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { field } if field == "location.name"));
    }

    #[test]
    fn test_bad_observed_at() {
        let mut payload = sample_payload();
        payload["current"]["last_updated"] = json!("not a timestamp");
        let err = snapshot(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { field } if field == "current.last_updated"));
    }

    #[test]
    fn test_bad_forecast_date_names_index() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"][1]["date"] = json!("16/03/2024");
        let err = snapshot(&payload).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MalformedResponse { field } if field == "forecast.forecastday[1].date"
        ));
    }

    #[test]
    fn test_percentage_clamped() {
        let mut payload = sample_payload();
        payload["current"]["humidity"] = json!(150);
        payload["forecast"]["forecastday"][0]["day"]["daily_chance_of_rain"] = json!(-5);
        let snap = snapshot(&payload).unwrap();
        assert_eq!(snap.current.humidity_pct, 100);
        assert_eq!(snap.forecast[0].chance_of_rain_pct, 0);
    }

    #[test]
    fn test_non_numeric_percentage_rejected() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"][0]["day"]["avghumidity"] = json!("humid");
        let err = snapshot(&payload).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MalformedResponse { field } if field == "forecast.forecastday[0].day.avghumidity"
        ));
    }
}
