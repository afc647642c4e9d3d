#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::Config;

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/chainfall.toml";

// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "CHAINFALL_CONFIG";

// Load the configuration from the file system
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    let config_path = get_config_file_path();

    // Create default config file if it doesn't exist
    if !config_path.exists() {
        let default_config = Config::default();
        save_config_to_file(&default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&contents)?;

    // Reject unusable difficulty overrides up front
    config.rules()?;
    Ok(config)
}

// Save the configuration to the file system
pub fn save_config_to_file(config: &Config) -> Result<(), ConfigError> {
    let config_path = get_config_file_path();

    // Create parent directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(&config_path, toml_string)?;

    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("chainfall").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Serialize(err) => write!(f, "config serialize error: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
