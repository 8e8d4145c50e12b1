use clap::{Parser, Subcommand};

use weather_app::{EnvLocator, Phase, ProxyClient, ThemeStore, WeatherSession, WeatherStore};
use weather_core::WeatherDto;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clouds", version, about = "Clouds weather terminal client")]
pub struct Cli {
    /// Base URL of the weather proxy.
    #[arg(long, default_value = "http://localhost:5000")]
    pub server: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for the device location, falling back to Manila.
    /// Device coordinates come from CLOUDS_LAT / CLOUDS_LON.
    Show,

    /// Show weather for a place by name.
    Search {
        /// City or place name, e.g. "Manila".
        place: String,
    },

    /// Toggle the persisted light/dark theme.
    Theme,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show => {
                let session = WeatherSession::new(ProxyClient::new(self.server));
                session.mount(&EnvLocator).await;
                render(&session.snapshot());
            }
            Command::Search { place } => {
                let session = WeatherSession::new(ProxyClient::new(self.server));
                session.search(&place).await;
                render(&session.snapshot());
            }
            Command::Theme => {
                let mut store = ThemeStore::open(ThemeStore::default_path()?)?;
                let theme = store.toggle()?;
                println!("Theme set to {}", theme.as_str());
            }
        }

        Ok(())
    }
}

fn render(store: &WeatherStore) {
    if let Some(banner) = store.error() {
        println!("! {banner}");
    }

    match store.phase() {
        Phase::Loaded => {
            if let Some(dto) = store.data() {
                render_dto(dto, store.location_fetched());
            }
        }
        Phase::Failed => println!("No weather to show."),
        Phase::Loading | Phase::Idle => println!("Still loading."),
    }
}

fn render_dto(dto: &WeatherDto, location_fetched: bool) {
    let source = if location_fetched { "device location" } else { "fallback location" };
    println!("{}, {} ({}) — {}", dto.location, dto.country, dto.local_time, source);
    println!("{}  {:.1}°C (feels like {:.1}°C)", dto.condition, dto.temperature, dto.real_feel);
    println!(
        "Humidity {}%  Dew point {:.1}°C  Pressure {} mb  Visibility {} km  UV {}",
        dto.humidity, dto.dew_point, dto.pressure, dto.visibility, dto.uv_index
    );
    println!(
        "Wind {} kph {} gusting {} kph  Cloud {}%",
        dto.wind_speed, dto.wind_direction_full, dto.wind_gusts, dto.cloud_cover
    );
    println!("Sunrise {}  Sunset {}", dto.sunrise, dto.sunset);

    if !dto.hourly.is_empty() {
        println!("\nToday:");
        for hour in &dto.hourly {
            println!("  {}  {:>5.1}°C  {}", hour.time, hour.temperature, hour.condition);
        }
    }

    if !dto.daily.is_empty() {
        println!("\nForecast:");
        for day in &dto.daily {
            println!(
                "  {} {} {}  {:>5.1}° / {:>5.1}°  {}",
                day.weekday, day.month, day.day, day.high, day.low, day.condition
            );
        }
    }
}
