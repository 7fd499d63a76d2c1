pub mod config;
pub mod event;
pub mod generate;
pub mod render;

use std::path::PathBuf;

use availability_core::Config;
use chrono::{Local, NaiveDate, NaiveDateTime};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `--config` if given, otherwise the default location.
pub fn resolve_config_path(
    config_path: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => Ok(path),
        None => Ok(Config::path()?),
    }
}

pub fn load_config(
    config_path: Option<PathBuf>,
) -> Result<(PathBuf, Config), Box<dyn std::error::Error>> {
    let path = resolve_config_path(config_path)?;
    let config = Config::load_from(&path)?;
    Ok((path, config))
}

pub fn parse_date(text: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{text}' (expected YYYY-MM-DD): {e}").into())
}

/// Parse "YYYY-MM-DD HH:MM", or return the local wall clock.
pub fn parse_now(text: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match text {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").map_err(|e| {
            format!("invalid time '{text}' (expected YYYY-MM-DD HH:MM): {e}").into()
        }),
        None => Ok(Local::now().naive_local()),
    }
}
