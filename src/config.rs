//! Configuration loading
//!
//! Settings live in a small TOML file (`listening-now/config.toml` under the
//! platform config directory). Both keys are optional; a missing file yields
//! the defaults, matching the original tool's behavior of running fine with
//! no config at all.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default status template. `%1` = title, `%2` = artist.
pub const DEFAULT_TEMPLATE: &str = "Listening '%1' by %2";

/// Default watchdog window in minutes.
pub const DEFAULT_WATCHDOG_MINS: u64 = 10;

/// User configuration, immutable after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Status text template with `%1` (title) and `%2` (artist) slots.
    #[serde(default = "default_template")]
    pub display_template: String,

    /// Minutes without a track event before the watchdog clears the status.
    /// Also the watchdog's wake-up period. Zero is treated as 1.
    #[serde(default = "default_watchdog_mins")]
    pub watchdog_interval_mins: u64,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_watchdog_mins() -> u64 {
    DEFAULT_WATCHDOG_MINS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_template: default_template(),
            watchdog_interval_mins: default_watchdog_mins(),
        }
    }
}

impl Config {
    /// The watchdog period as a `Duration`, with zero clamped to one minute.
    #[must_use]
    pub fn watchdog_period(&self) -> Duration {
        Duration::from_secs(60 * self.watchdog_interval_mins.max(1))
    }
}

/// Default config file location: `<config dir>/listening-now/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("listening-now").join("config.toml"))
}

/// Loads the config file at `path`, returning `Config::default()` if the file
/// does not exist. A file that exists but cannot be read or parsed is an
/// error, not a silent fallback.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
