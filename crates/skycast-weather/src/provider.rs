//! WeatherAPI.com forecast client.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::error::{malformed, WeatherError};
use crate::normalize;
use crate::types::WeatherSnapshot;

const WEATHER_API_BASE: &str = "https://api.weatherapi.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    api_key: String,
    base_url: String,
    forecast_days: u8,
    lang: Option<String>,
}

impl WeatherProvider {
    /// Create a provider with the default endpoint and a 7-day forecast.
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: WEATHER_API_BASE.to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            lang: None,
        })
    }

    /// Number of forecast days to request (provider caps apply).
    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    /// Language code for provider-localized condition texts.
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = Some(lang.to_string());
        self
    }

    /// Override the provider endpoint (configurable, and used by tests to
    /// point at a mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Query key for a coordinate pair, as produced by a geolocation lookup.
    pub fn coords_query(latitude: f64, longitude: f64) -> String {
        format!("{latitude},{longitude}")
    }

    /// Fetch and normalize the forecast for a query (city name, "lat,lon"
    /// pair, or a favorite's query key).
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        let mut url = format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            self.forecast_days,
        );
        if let Some(lang) = &self.lang {
            url.push_str(&format!("&lang={}", urlencoding::encode(lang)));
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(WeatherError::LocationNotFound);
            }
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Weather provider request failed");
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        // A 2xx with an undecodable body is the provider's fault, not the
        // connection's.
        let body = response.text().await?;
        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| malformed("body"))?;
        normalize::snapshot(&raw)
    }
}
