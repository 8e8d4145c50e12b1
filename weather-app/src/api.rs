//! HTTP client for the proxy's `/api/weather` routes.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use weather_core::WeatherDto;

use crate::geolocate::Coordinates;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy answered with an error body; the message is shown as-is.
    #[error("{0}")]
    Api(String),

    /// The proxy was unreachable or the response unreadable.
    #[error("Network error or server is down")]
    Network,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }

    pub async fn fetch_by_coords(&self, coords: Coordinates) -> Result<WeatherDto, FetchError> {
        let url = format!(
            "{}/api/weather?lat={}&lon={}",
            self.base_url, coords.latitude, coords.longitude
        );
        self.get_dto(&url).await
    }

    pub async fn fetch_by_place(&self, place: &str) -> Result<WeatherDto, FetchError> {
        let url = format!("{}/api/weather/{place}", self.base_url);
        self.get_dto(&url).await
    }

    async fn get_dto(&self, url: &str) -> Result<WeatherDto, FetchError> {
        let res = self.http.get(url).send().await.map_err(|err| {
            tracing::warn!(url, error = %err, "proxy request failed");
            FetchError::Network
        })?;

        if !res.status().is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Something went wrong".to_string());
            return Err(FetchError::Api(message));
        }

        res.json::<WeatherDto>().await.map_err(|err| {
            tracing::warn!(url, error = %err, "unreadable proxy response");
            FetchError::Network
        })
    }
}
