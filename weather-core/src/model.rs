use serde::{Deserialize, Serialize};

/// US EPA air-quality index, or `"N/A"` when the provider omitted it.
///
/// The wire contract emits either the bare number or the literal string,
/// hence the untagged representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AirQuality {
    Index(u8),
    Unavailable(String),
}

impl AirQuality {
    pub fn unavailable() -> Self {
        AirQuality::Unavailable("N/A".to_string())
    }
}

/// One hour of the current forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// 24-hour `HH:MM` label in the location's local time.
    pub time: String,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

/// One forecast day, pre-split for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// 3-letter weekday abbreviation, e.g. "Mon".
    pub weekday: String,
    /// 3-letter month abbreviation, e.g. "Sep".
    pub month: String,
    /// Zero-padded day of month, e.g. "29".
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub icon: String,
}

/// Flat weather record handed to the presentation layer.
///
/// Field names serialize in camelCase to match the JSON contract the
/// front end consumes. Constructed fresh on every successful proxy call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDto {
    pub location: String,
    pub local_time: String,
    pub country: String,
    pub temperature: f64,
    pub condition: String,
    pub humidity: u8,
    pub dew_point: f64,
    pub icon: String,
    pub precipitation: f64,
    pub forecast_precipitation: f64,
    pub visibility: f64,
    pub pressure: f64,
    pub uv_index: f64,
    pub sunrise: String,
    pub sunset: String,
    pub real_feel_shade: f64,
    pub wind_speed: f64,
    pub wind_gusts: f64,
    pub air_quality: AirQuality,
    pub real_feel: f64,
    pub cloud_cover: u8,
    pub wind_direction: String,
    pub wind_direction_full: String,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}
