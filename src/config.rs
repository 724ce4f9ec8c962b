//! Configuration management (`config.toml`)
//!
//! Handles loading and providing defaults for pacing and UI settings.
//! Settings are stored in TOML format, either at a path given on the command
//! line or in the platform-specific config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Pacing of the stepping engine
    #[serde(default)]
    pub stepper: StepperConfig,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Stepper timing and history settings. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperConfig {
    /// Fixed step delay used by `run` (default: 800)
    #[serde(default = "default_run_delay")]
    pub run_delay_ms: u64,
    /// Step delay at speed 1.0 in auto-play; divided by the speed (default: 2000)
    #[serde(default = "default_auto_baseline")]
    pub auto_baseline_ms: u64,
    /// Settle time after rendering the initial state for run/auto (default: 300)
    #[serde(default = "default_settle")]
    pub settle_ms: u64,
    /// Settle time before the first single step (default: 200)
    #[serde(default = "default_step_settle")]
    pub step_settle_ms: u64,
    /// Memory limit of the step history in bytes (default: 64 MiB)
    #[serde(default = "default_history_limit")]
    pub history_limit_bytes: usize,
}

/// Terminal UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Auto-play speed multiplier on startup (default: 1.0)
    #[serde(default = "default_speed")]
    pub default_speed: f64,
    /// Event poll interval in milliseconds (default: 50)
    #[serde(default = "default_tick")]
    pub tick_ms: u64,
}

fn default_run_delay() -> u64 {
    800
}
fn default_auto_baseline() -> u64 {
    2000
}
fn default_settle() -> u64 {
    300
}
fn default_step_settle() -> u64 {
    200
}
fn default_history_limit() -> usize {
    64 * 1024 * 1024
}
fn default_speed() -> f64 {
    1.0
}
fn default_tick() -> u64 {
    50
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            run_delay_ms: default_run_delay(),
            auto_baseline_ms: default_auto_baseline(),
            settle_ms: default_settle(),
            step_settle_ms: default_step_settle(),
            history_limit_bytes: default_history_limit(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
            tick_ms: default_tick(),
        }
    }
}

impl StepperConfig {
    /// No delays at all, for tests and headless tracing
    pub fn instant() -> Self {
        Self {
            run_delay_ms: 0,
            auto_baseline_ms: 0,
            settle_ms: 0,
            step_settle_ms: 0,
            history_limit_bytes: default_history_limit(),
        }
    }

    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }

    /// Step delay for an auto-play speed multiplier, or `None` when the
    /// delay does not fit in a `Duration`
    pub fn auto_delay(&self, speed: f64) -> Option<Duration> {
        Duration::try_from_secs_f64(self.auto_baseline_ms as f64 / 1000.0 / speed).ok()
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn step_settle(&self) -> Duration {
        Duration::from_millis(self.step_settle_ms)
    }
}

/// Errors while loading an explicitly requested config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "algostep", "algostep")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the platform-specific data directory (used for the TUI log file).
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "algostep", "algostep")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Parse configuration from TOML text
pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the configuration.
///
/// An explicit `path` must exist and parse. Without one, `config.toml` in the
/// platform config directory is used when present, and defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        return parse(&content, path);
    }

    let Some(path) = config_dir().map(|dir| dir.join("config.toml")) else {
        return Ok(Config::default());
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => parse(&content, &path),
        Err(_) => Ok(Config::default()),
    }
}
