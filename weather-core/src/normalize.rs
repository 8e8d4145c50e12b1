//! Forecast normalizer: reshapes a raw WeatherAPI forecast payload into the
//! flat [`WeatherDto`] the presentation layer consumes.
//!
//! The normalizer trusts the wire types — serde already enforced the shape
//! at the proxy boundary. The only structural condition checked here is the
//! presence of at least one forecast day, because "today" anchors both the
//! hourly series and the astro fields.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::model::{AirQuality, DailyEntry, HourlyEntry, WeatherDto};
use crate::weatherapi::{Day, ForecastResponse};

const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point in °C from temperature (°C) and relative humidity (%), using
/// the Magnus-form approximation, rounded to one decimal.
///
/// Humidity must lie in (0, 100]; `ln(h/100)` makes the result NaN at or
/// below zero.
pub fn dew_point(temp_c: f64, humidity_pct: f64) -> f64 {
    let alpha = (MAGNUS_A * temp_c) / (MAGNUS_B + temp_c) + (humidity_pct / 100.0).ln();
    round1((MAGNUS_B * alpha) / (MAGNUS_A - alpha))
}

/// 24-hour `HH:MM` label from a provider hour timestamp such as
/// `"2025-09-29 13:00"`. The timestamp is already in the location's local
/// time; no timezone conversion happens here.
pub fn format_hour(time_str: &str) -> Result<String> {
    let dt = parse_local(time_str)?;
    Ok(dt.format("%H:%M").to_string())
}

/// 12-hour `HH:MM AM/PM` label from the location's reported local-time
/// string. The provider does not zero-pad the hour ("2025-09-29 9:05");
/// the parser accepts both forms.
pub fn format_local_time(local_time_str: &str) -> Result<String> {
    let dt = parse_local(local_time_str)?;
    Ok(dt.format("%I:%M %p").to_string())
}

/// One `daily` entry from a forecast day's civil date and day aggregate.
///
/// The date parses as a naive calendar date, so the derived weekday and
/// month never depend on the host timezone.
pub fn format_daily_entry(date_str: &str, day: &Day) -> Result<DailyEntry> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid forecast date: {date_str}"))?;

    Ok(DailyEntry {
        weekday: date.format("%a").to_string(),
        month: date.format("%b").to_string(),
        day: format!("{:02}", date.day()),
        high: day.maxtemp_c,
        low: day.mintemp_c,
        condition: day.condition.text.clone(),
        icon: day.condition.icon.clone(),
    })
}

/// Full compass name for a 16-point wind direction code.
///
/// Empty input maps to `"Unknown"`; a present-but-unrecognized code passes
/// through unchanged.
pub fn expand_wind_direction(code: &str) -> String {
    let full = match code {
        "N" => "North",
        "NNE" => "North-Northeast",
        "NE" => "Northeast",
        "ENE" => "East-Northeast",
        "E" => "East",
        "ESE" => "East-Southeast",
        "SE" => "Southeast",
        "SSE" => "South-Southeast",
        "S" => "South",
        "SSW" => "South-Southwest",
        "SW" => "Southwest",
        "WSW" => "West-Southwest",
        "W" => "West",
        "WNW" => "West-Northwest",
        "NW" => "Northwest",
        "NNW" => "North-Northwest",
        "" => "Unknown",
        other => other,
    };
    full.to_string()
}

/// Assemble the flat DTO from a raw forecast payload.
///
/// The first forecast day is "today": it supplies the hourly series, the
/// astro fields, and the forecast precipitation total. Every returned
/// forecast day maps into `daily`.
pub fn assemble(raw: &ForecastResponse) -> Result<WeatherDto> {
    let current = &raw.current;
    let today = raw
        .forecast
        .forecastday
        .first()
        .context("WeatherAPI response contained no forecastday data")?;

    let hourly = today
        .hour
        .iter()
        .map(|hour| {
            Ok(HourlyEntry {
                time: format_hour(&hour.time)?,
                temperature: hour.temp_c,
                condition: hour.condition.text.clone(),
                icon: hour.condition.icon.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let daily = raw
        .forecast
        .forecastday
        .iter()
        .map(|day| format_daily_entry(&day.date, &day.day))
        .collect::<Result<Vec<_>>>()?;

    let air_quality = current
        .air_quality
        .as_ref()
        .and_then(|aq| aq.us_epa_index)
        .map_or_else(AirQuality::unavailable, AirQuality::Index);

    Ok(WeatherDto {
        location: raw.location.name.clone(),
        local_time: format_local_time(&raw.location.localtime)?,
        country: raw.location.country.clone(),
        temperature: current.temp_c,
        condition: current.condition.text.clone(),
        humidity: current.humidity,
        dew_point: dew_point(current.temp_c, f64::from(current.humidity)),
        icon: current.condition.icon.clone(),
        precipitation: current.precip_mm,
        forecast_precipitation: today.day.totalprecip_mm,
        visibility: current.vis_km,
        pressure: current.pressure_mb,
        uv_index: current.uv,
        sunrise: today.astro.sunrise.clone(),
        sunset: today.astro.sunset.clone(),
        real_feel_shade: current.feelslike_c,
        wind_speed: current.wind_kph,
        wind_gusts: current.gust_kph,
        air_quality,
        real_feel: current.feelslike_c,
        cloud_cover: current.cloud,
        wind_direction: current.wind_dir.clone(),
        wind_direction_full: expand_wind_direction(&current.wind_dir),
        hourly,
        daily,
    })
}

fn parse_local(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .with_context(|| format!("Invalid local timestamp: {s}"))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
