//! Configuration file handling.
//!
//! Settings are read from `$XDG_CONFIG_HOME/pangolin/config.toml` when the
//! file exists, otherwise built-in defaults apply. Command line flags
//! override both.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base url of the backend API.
    pub url: String,
    /// Per request timeout in seconds.
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: pangolin_api::DEFAULT_BASE_URL.to_string(),
            timeout: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Telemetry polling period in milliseconds.
    pub refresh_interval: u64,
    /// Upper bound on rows kept per table.
    pub max_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_interval: 5_000,
            max_rows: 1_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color used for suspicious or failing entries.
    pub suspicious: String,
    /// Color used for healthy entries.
    pub normal: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            suspicious: "red".to_string(),
            normal: "green".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn suspicious_color(&self) -> Color {
        self.suspicious.parse().unwrap_or(Color::Red)
    }

    pub fn normal_color(&self) -> Color {
        self.normal.parse().unwrap_or(Color::Green)
    }
}

impl Config {
    /// Loads the configuration from the default location, falling back to
    /// defaults when no file is present.
    pub fn load() -> Result<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.display.refresh_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout)
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pangolin").join("config.toml"))
}
