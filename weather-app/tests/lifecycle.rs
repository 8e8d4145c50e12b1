//! Integration tests for the mount/search lifecycle, with wiremock
//! standing in for the proxy.

use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_app::{
    Coordinates, LocationError, LocationProvider, Phase, ProxyClient, WeatherSession,
};

struct StaticLocator(Coordinates);

#[async_trait]
impl LocationProvider for StaticLocator {
    async fn resolve(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

struct DeniedLocator;

#[async_trait]
impl LocationProvider for DeniedLocator {
    async fn resolve(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

fn dto_json(location: &str) -> Value {
    json!({
        "location": location,
        "localTime": "01:05 PM",
        "country": "Testland",
        "temperature": 30.0,
        "condition": "Partly cloudy",
        "humidity": 70,
        "dewPoint": 23.9,
        "icon": "//icon/116.png",
        "precipitation": 0.0,
        "forecastPrecipitation": 1.4,
        "visibility": 10.0,
        "pressure": 1009.0,
        "uvIndex": 7.0,
        "sunrise": "05:45 AM",
        "sunset": "05:55 PM",
        "realFeelShade": 34.2,
        "windSpeed": 13.0,
        "windGusts": 19.1,
        "airQuality": 1,
        "realFeel": 34.2,
        "cloudCover": 50,
        "windDirection": "NE",
        "windDirectionFull": "Northeast",
        "hourly": [],
        "daily": []
    })
}

/// Mock the coords route for the fallback location (Manila).
async fn mock_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "14.5995"))
        .and(query_param("lon", "120.9842"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dto_json("Manila")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn denied_geolocation_shows_fallback_with_banner() {
    let server = MockServer::start().await;
    mock_fallback(&server).await;

    let session = WeatherSession::new(ProxyClient::new(server.uri()));
    session.mount(&DeniedLocator).await;

    let store = session.snapshot();
    assert_eq!(store.phase(), Phase::Loaded);
    assert_eq!(store.data().unwrap().location, "Manila");
    assert!(!store.location_fetched());
    assert_eq!(store.error(), Some("Location access denied, showing fallback weather"));
}

#[tokio::test]
async fn granted_geolocation_wins_over_fallback() {
    let server = MockServer::start().await;
    mock_fallback(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dto_json("Berlin")))
        .mount(&server)
        .await;

    let session = WeatherSession::new(ProxyClient::new(server.uri()));
    session.mount(&StaticLocator(Coordinates { latitude: 52.52, longitude: 13.405 })).await;

    let store = session.snapshot();
    assert_eq!(store.phase(), Phase::Loaded);
    assert_eq!(store.data().unwrap().location, "Berlin");
    assert!(store.location_fetched());
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn cancelled_session_applies_nothing() {
    let server = MockServer::start().await;
    mock_fallback(&server).await;

    let session = WeatherSession::new(ProxyClient::new(server.uri()));
    session.shutdown();
    session.mount(&DeniedLocator).await;

    let store = session.snapshot();
    assert!(store.data().is_none());
    assert!(!store.location_fetched());
}

#[tokio::test]
async fn search_replaces_mounted_data() {
    let server = MockServer::start().await;
    mock_fallback(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/weather/Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dto_json("Tokyo")))
        .mount(&server)
        .await;

    let session = WeatherSession::new(ProxyClient::new(server.uri()));
    session.mount(&DeniedLocator).await;
    session.search("Tokyo").await;

    let store = session.snapshot();
    assert_eq!(store.phase(), Phase::Loaded);
    assert_eq!(store.data().unwrap().location, "Tokyo");
}

#[tokio::test]
async fn failed_search_shows_error_view_not_stale_data() {
    let server = MockServer::start().await;
    mock_fallback(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/weather/Nowhereville123"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "City not found. Try checking your spelling or using a nearby city."
        })))
        .mount(&server)
        .await;

    let session = WeatherSession::new(ProxyClient::new(server.uri()));
    session.mount(&DeniedLocator).await;
    session.search("Nowhereville123").await;

    let store = session.snapshot();
    assert_eq!(store.phase(), Phase::Failed);
    assert!(store.data().is_none());
    assert!(store.error().unwrap().starts_with("City not found"));
}
