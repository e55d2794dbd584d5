mod config;

pub use config::PlannerConfig;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/weekplan[-dev]/` based on WEEKPLAN_ENV.
///
/// Set WEEKPLAN_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?.join(".config");

    let env = std::env::var("WEEKPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("weekplan-dev")
    } else {
        base_dir.join("weekplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default location of the configuration file.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}
