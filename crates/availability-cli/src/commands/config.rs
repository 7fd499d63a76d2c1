use std::path::PathBuf;

use availability_core::Config;
use clap::Subcommand;

use super::{load_config, resolve_config_path, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "schedule.step", "levels.0.label")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(config_path: Option<PathBuf>, action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let (_, config) = load_config(config_path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let (path, mut config) = load_config(config_path)?;
            config.set(&key, &value)?;
            config.validate()?;
            config.save_to(&path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let (_, config) = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let path = resolve_config_path(config_path)?;
            Config::default().save_to(&path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", resolve_config_path(config_path)?.display());
        }
    }
    Ok(())
}
