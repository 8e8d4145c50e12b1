//! Binary entry point for the Clouds weather proxy.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use weather_core::{Config, WeatherApiClient};
use weather_server::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let api_key = config.require_api_key()?.to_string();

    let client = match config.api_base.clone() {
        Some(base) => WeatherApiClient::with_base_url(api_key, base),
        None => WeatherApiClient::new(api_key),
    };

    let app = router(AppState { client });

    let port = config.port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    tracing::info!("Backend server running on http://localhost:{port}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
