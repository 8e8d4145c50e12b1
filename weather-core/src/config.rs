use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Default proxy listen port, matching the original deployment.
pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration, stored on disk as TOML with environment-variable
/// overrides.
///
/// Resolution order for each field: environment variable, then config
/// file, then default. `WEATHER_API_KEY` / `PORT` / `WEATHER_API_BASE`
/// are the recognized variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// WeatherAPI.com API key.
    pub api_key: Option<String>,

    /// Listen port; defaults to 5000.
    pub port: Option<u16>,

    /// Override for the upstream base URL. Normally unset.
    pub api_base: Option<String>,
}

impl Config {
    /// Load config from disk and apply environment overrides. A missing
    /// config file is not an error; a missing API key is reported by
    /// [`Config::require_api_key`] at startup instead.
    pub fn load() -> Result<Self> {
        let mut cfg = match Self::config_file_path() {
            Ok(path) if path.exists() => {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(key) = env::var("WEATHER_API_KEY") {
            cfg.api_key = Some(key);
        }
        if let Ok(port) = env::var("PORT") {
            let port = port.parse::<u16>().context("PORT must be a number between 1 and 65535")?;
            cfg.port = Some(port);
        }
        if let Ok(base) = env::var("WEATHER_API_BASE") {
            cfg.api_base = Some(base);
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clouds", "clouds-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// API key, or a startup error with a hint.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No WeatherAPI.com API key configured.\n\
                 Hint: set the WEATHER_API_KEY environment variable, or add `api_key = \"...\"` to the config file."
            )
        })
    }
}
