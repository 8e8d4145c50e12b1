//! Core library for the Clouds weather proxy.
//!
//! This crate defines:
//! - Configuration handling (API key, port)
//! - The WeatherAPI.com forecast client and its wire types
//! - The forecast normalizer and the flat DTO it produces
//!
//! It is used by `weather-server` (the HTTP proxy) and `weather-app`
//! (the terminal front end), which shares the DTO types.

pub mod config;
pub mod model;
pub mod normalize;
pub mod weatherapi;

pub use config::Config;
pub use model::{AirQuality, DailyEntry, HourlyEntry, WeatherDto};
pub use weatherapi::WeatherApiClient;
