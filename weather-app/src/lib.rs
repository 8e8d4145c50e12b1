//! Client library for the Clouds weather terminal front end.
//!
//! This crate defines:
//! - The proxy API client
//! - Device geolocation resolution with a fallback location
//! - The weather state store and its mount/search lifecycle
//! - The persisted theme store

pub mod api;
pub mod geolocate;
pub mod store;
pub mod theme;

pub use api::{FetchError, ProxyClient};
pub use geolocate::{Coordinates, EnvLocator, FALLBACK_COORDS, LocationError, LocationProvider};
pub use store::{Phase, WeatherSession, WeatherStore};
pub use theme::{Theme, ThemeStore};
