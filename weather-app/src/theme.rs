//! Persisted light/dark theme: read at startup, written through on every
//! change.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// File-backed theme store.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    theme: Theme,
}

impl ThemeStore {
    /// Open the store at `path`, reading the saved choice. A missing
    /// file means the default (light) theme.
    pub fn open(path: PathBuf) -> Result<Self> {
        let theme = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read theme file: {}", path.display()))?;
            let file: ThemeFile = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse theme file: {}", path.display()))?;
            file.theme
        } else {
            Theme::default()
        };

        Ok(Self { path, theme })
    }

    /// Default location under the platform config dir.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clouds", "clouds-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("theme.toml"))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&ThemeFile { theme })
            .context("Failed to serialize theme to TOML")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write theme file: {}", self.path.display()))?;

        Ok(())
    }

    /// Toggle and persist, returning the new theme.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }
}
