//! Configuration management for typewrite
//!
//! Read from `$XDG_CONFIG_HOME/typewrite/config.toml` (or the platform
//! equivalent). A missing file means defaults; a partial file fills the rest
//! from defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::caret::CaretController;
use crate::player::state::millis;
use crate::player::Timing;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub caret: CaretConfig,
}

/// Default typing and backspacing speeds, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub typing_speed_ms: u64,
    pub backspace_speed_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: millis(Timing::DEFAULT_TYPING_SPEED),
            backspace_speed_ms: millis(Timing::DEFAULT_BACKSPACE_SPEED),
        }
    }
}

impl TimingConfig {
    pub fn to_timing(&self) -> Timing {
        Timing::new(
            Duration::from_millis(self.typing_speed_ms),
            Duration::from_millis(self.backspace_speed_ms),
        )
    }
}

/// Caret appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    /// Full on/off blink cycle; 0 disables blinking.
    pub blink_period_ms: u64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            blink_period_ms: millis(CaretController::DEFAULT_BLINK_PERIOD),
        }
    }
}

impl CaretConfig {
    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("typewrite").join("config.toml"))
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
