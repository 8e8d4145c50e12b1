//! HTTP client for WeatherAPI.com's forecast endpoint.
//!
//! One request shape only: `forecast.json` with a free-text or `lat,lon`
//! query, 15 days, air quality included. No retry, no cache — every call
//! is a fresh upstream request.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

/// Number of forecast days requested; the provider caps the reply at
/// whatever the account plan allows.
pub const FORECAST_DAYS: u8 = 15;

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client pointed at a non-default host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// Fetch the 15-day forecast for a free-text place query or a
    /// `"lat,lon"` pair.
    pub async fn fetch_forecast(&self, query: &str) -> Result<ForecastResponse> {
        let url = format!("{}/v1/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", &FORECAST_DAYS.to_string()),
                ("aqi", "yes"),
            ])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI forecast response body")?;

        if !status.is_success() {
            tracing::error!(%status, body = %truncate_body(&body), "WeatherAPI forecast request failed");
            return Err(anyhow::anyhow!(
                "WeatherAPI forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")?;

        Ok(parsed)
    }
}

// Wire types below mirror the subset of the provider payload this system
// consumes; serde deserialization doubles as the shape check at the proxy
// boundary, so a structurally broken payload fails here instead of deep
// inside the normalizer.

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Local wall-clock time, e.g. "2025-09-29 9:05" (hour not padded).
    pub localtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityRaw {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub humidity: u8,
    pub condition: Condition,
    pub precip_mm: f64,
    pub vis_km: f64,
    pub pressure_mb: f64,
    pub uv: f64,
    pub cloud: u8,
    pub wind_kph: f64,
    pub gust_kph: f64,
    pub wind_dir: String,
    pub air_quality: Option<AirQualityRaw>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub totalprecip_mm: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hour {
    /// Local timestamp, e.g. "2025-09-29 13:00".
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    /// Civil date, e.g. "2025-09-29".
    pub date: String,
    pub day: Day,
    pub astro: Astro,
    pub hour: Vec<Hour>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
