//! Configuration management for Switch TestKit
//!
//! Provides persistent configuration loaded from a platform-specific config
//! file. Command line flags override whatever the file says.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/switch-testkit/config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use switch_testkit::Config;
//!
//! // Load existing config or use defaults
//! let mut config = Config::load().unwrap_or_default();
//!
//! // Modify settings
//! config.switch.timeout_secs = 30;
//!
//! // Save to disk
//! config.save().expect("Failed to save config");
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Input device the switches are wired to
pub const DEFAULT_DEVICE: &str = "/dev/input/event0";
/// Seconds to wait for each press
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("switch-testkit");

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Device and timing settings
    #[serde(default)]
    pub switch: SwitchConfig,
    /// Log output settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Device and timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Input event device node
    pub device: PathBuf,
    /// Seconds to wait for each switch press
    pub timeout_secs: u64,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Most verbose level printed
    pub level: LevelFilter,
    /// Colorize output
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            color: true,
        }
    }
}

impl LogConfig {
    /// Raise the level by `steps` (one per `-v`), saturating at trace
    pub fn raise_verbosity(&mut self, steps: u8) {
        const LEVELS: [LevelFilter; 6] = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];
        let current = LEVELS.iter().position(|l| *l == self.level).unwrap_or(3);
        let raised = (current + steps as usize).min(LEVELS.len() - 1);
        self.level = LEVELS[raised];
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Per-press timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.switch.timeout_secs)
    }
}
