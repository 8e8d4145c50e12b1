//! Device location resolution with a hardcoded fallback.

use async_trait::async_trait;
use std::env;
use thiserror::Error;

/// Fallback coordinates (Manila), used whenever device location is
/// unavailable.
pub const FALLBACK_COORDS: Coordinates = Coordinates { latitude: 14.5995, longitude: 120.9842 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("location access denied")]
    Denied,

    #[error("geolocation not supported")]
    Unsupported,
}

/// Source of device coordinates. Resolution failure is never fatal; the
/// caller falls back to [`FALLBACK_COORDS`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn resolve(&self) -> Result<Coordinates, LocationError>;
}

/// Resolver backed by the `CLOUDS_LAT` / `CLOUDS_LON` environment
/// variables — the terminal stand-in for the browser's location prompt.
/// Reports `Unsupported` when either variable is missing or malformed.
#[derive(Debug, Default)]
pub struct EnvLocator;

#[async_trait]
impl LocationProvider for EnvLocator {
    async fn resolve(&self) -> Result<Coordinates, LocationError> {
        let lat = env::var("CLOUDS_LAT").ok().and_then(|v| v.parse::<f64>().ok());
        let lon = env::var("CLOUDS_LON").ok().and_then(|v| v.parse::<f64>().ok());

        match (lat, lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
            _ => Err(LocationError::Unsupported),
        }
    }
}
