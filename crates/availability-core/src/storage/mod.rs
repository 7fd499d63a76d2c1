mod config;

pub use config::{Config, LastDayRule, ScheduleConfig, MAX_DAY_COUNT};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "AVAILABILITY_CONFIG";

/// Returns the config file path.
///
/// `AVAILABILITY_CONFIG` wins when set; otherwise
/// `~/.config/availability/config.toml`.
///
/// # Errors
/// Returns an error if no override is set and the home directory cannot be
/// determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let home = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(home.join(".config").join("availability").join("config.toml"))
}
