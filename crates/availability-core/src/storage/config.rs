//! TOML-based configuration.
//!
//! Stores everything generation needs:
//! - Schedule geometry (work hours, lunch window, step, day count)
//! - The short last day rule
//! - Table presentation knobs (title, row class cycle, cell class prefix)
//! - The workload level catalog and the two special states
//! - Custom events layered over the generated grid
//!
//! Configuration is stored at `~/.config/availability/config.toml` unless
//! overridden (see [`super::default_config_path`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::events::CustomEvent;
use crate::levels::{default_levels, LevelCatalog, SpecialState, WorkloadLevel};
use crate::time::{minutes_of, text_of, MINUTES_PER_DAY};

/// Longest window a single grid may cover.
pub const MAX_DAY_COUNT: u32 = 366;

/// How the generator decides which day is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastDayRule {
    /// Compare raw day-of-month numbers: `day == start_day + day_count - 1`.
    /// Misses the last day when the window crosses a month boundary.
    #[default]
    DayOfMonth,
    /// Count calendar days from the start date.
    Calendar,
}

/// Schedule geometry. All time fields are wall-clock `"H:MM"` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_work_start")]
    pub work_start: String,
    #[serde(default = "default_work_end")]
    pub work_end: String,
    #[serde(default = "default_lunch_start")]
    pub lunch_start: String,
    #[serde(default = "default_one_hour")]
    pub lunch_duration: String,
    #[serde(default = "default_true")]
    pub lunch_enabled: bool,
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default = "default_day_count")]
    pub day_count: u32,
    #[serde(default = "default_true")]
    pub shorten_last_day: bool,
    #[serde(default = "default_one_hour")]
    pub shorten_by: String,
    #[serde(default)]
    pub last_day_rule: LastDayRule,
    /// Row classes applied cyclically to table rows
    #[serde(default = "default_row_class_cycle")]
    pub row_class_cycle: Vec<String>,
    /// Cells get `<prefix>-<level>`
    #[serde(default = "default_cell_class_prefix")]
    pub cell_class_prefix: String,
}

/// Application configuration.
///
/// Serialized to/from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default = "default_levels")]
    pub levels: Vec<WorkloadLevel>,
    #[serde(default = "SpecialState::lunch")]
    pub lunch: SpecialState,
    #[serde(default = "SpecialState::end_of_week")]
    pub end_of_week: SpecialState,
    #[serde(default)]
    pub custom_events: Vec<CustomEvent>,
}

// Default functions
fn default_title() -> String {
    "Availability schedule for next week".into()
}
fn default_work_start() -> String {
    "9:00".into()
}
fn default_work_end() -> String {
    "17:00".into()
}
fn default_lunch_start() -> String {
    "12:00".into()
}
fn default_one_hour() -> String {
    "1:00".into()
}
fn default_step() -> String {
    "0:30".into()
}
fn default_day_count() -> u32 {
    5
}
fn default_true() -> bool {
    true
}
fn default_row_class_cycle() -> Vec<String> {
    vec!["sharp".into(), "half".into()]
}
fn default_cell_class_prefix() -> String {
    "available".into()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            work_start: default_work_start(),
            work_end: default_work_end(),
            lunch_start: default_lunch_start(),
            lunch_duration: default_one_hour(),
            lunch_enabled: true,
            step: default_step(),
            day_count: default_day_count(),
            shorten_last_day: true,
            shorten_by: default_one_hour(),
            last_day_rule: LastDayRule::default(),
            row_class_cycle: default_row_class_cycle(),
            cell_class_prefix: default_cell_class_prefix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            levels: default_levels(),
            lunch: SpecialState::lunch(),
            end_of_week: SpecialState::end_of_week(),
            custom_events: Vec::new(),
        }
    }
}

impl ScheduleConfig {
    pub fn work_start_minutes(&self) -> i64 {
        minutes_of(&self.work_start)
    }

    pub fn work_end_minutes(&self) -> i64 {
        minutes_of(&self.work_end)
    }

    pub fn lunch_start_minutes(&self) -> i64 {
        minutes_of(&self.lunch_start)
    }

    pub fn lunch_end_minutes(&self) -> i64 {
        self.lunch_start_minutes() + minutes_of(&self.lunch_duration)
    }

    /// Slots starting at or after this minute are end-of-week on the last day.
    pub fn short_day_start_minutes(&self) -> i64 {
        self.work_end_minutes() - minutes_of(&self.shorten_by)
    }

    pub fn step_minutes(&self) -> i64 {
        minutes_of(&self.step)
    }

    /// Number of slots each day gets.
    pub fn slots_per_day(&self) -> usize {
        let step = self.step_minutes();
        let span = self.work_end_minutes() - self.work_start_minutes();
        if step <= 0 || span <= 0 {
            return 0;
        }
        ((span + step - 1) / step) as usize
    }

    /// Check the geometry before generating a grid.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.step_minutes() <= 0 {
            return Err(ValidationError::NonPositiveStep(self.step.clone()));
        }
        if self.day_count == 0 {
            return Err(ValidationError::ZeroDayCount);
        }
        if self.day_count > MAX_DAY_COUNT {
            return Err(ValidationError::DayCountTooLarge {
                count: self.day_count,
                max: MAX_DAY_COUNT,
            });
        }

        let start = self.work_start_minutes();
        let end = self.work_end_minutes();
        if start >= end {
            return Err(ValidationError::InvalidWorkDay {
                start: self.work_start.clone(),
                end: self.work_end.clone(),
            });
        }
        if end > MINUTES_PER_DAY {
            return Err(ValidationError::WorkDayPastMidnight(self.work_end.clone()));
        }

        if self.lunch_enabled && self.lunch_end_minutes() > end {
            return Err(ValidationError::LunchOutsideWorkDay {
                start: self.lunch_start.clone(),
                duration: self.lunch_duration.clone(),
                end: self.work_end.clone(),
            });
        }

        if self.shorten_last_day && minutes_of(&self.shorten_by) >= end - start {
            return Err(ValidationError::ShortenTooLarge {
                shorten_by: self.shorten_by.clone(),
                span: text_of(end - start),
            });
        }

        Ok(())
    }
}

impl Config {
    /// Level catalog assembled from the `levels`, `lunch` and
    /// `end_of_week` sections.
    pub fn catalog(&self) -> LevelCatalog {
        LevelCatalog::new(
            self.levels.clone(),
            self.lunch.clone(),
            self.end_of_week.clone(),
        )
    }

    /// Validate schedule geometry, the level catalog and custom events.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.schedule.validate()?;
        self.catalog().validate()?;
        self.custom_events.iter().try_for_each(CustomEvent::validate)
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = match current {
                serde_json::Value::Array(items) => {
                    let index = part.parse::<usize>().map_err(|_| unknown())?;
                    items.get_mut(index).ok_or_else(unknown)?
                }
                other => other.get_mut(part).ok_or_else(unknown)?,
            };
        }

        Err(unknown())
    }

    /// Load from `path`, or return defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Load from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved or the file is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Default config location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path() -> Result<PathBuf> {
        Ok(super::default_config_path()?)
    }

    /// Persist to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        let save_failed = |e: std::io::Error| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(save_failed)?;
            }
        }
        std::fs::write(path, content).map_err(save_failed)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key
    /// (`schedule.step`, `levels.0.label`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, keeping the value's existing type.
    ///
    /// Does not persist; call [`Config::save_to`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_schedule_section_fills_defaults() {
        let parsed: Config =
            toml::from_str("[schedule]\nstep = \"0:15\"\nday_count = 3\n").unwrap();
        assert_eq!(parsed.schedule.step, "0:15");
        assert_eq!(parsed.schedule.day_count, 3);
        assert_eq!(parsed.schedule.work_start, "9:00");
        assert_eq!(parsed.schedule.last_day_rule, LastDayRule::DayOfMonth);
        assert_eq!(parsed.levels.len(), 6);
    }

    #[test]
    fn last_day_rule_parses_snake_case() {
        let parsed: Config =
            toml::from_str("[schedule]\nlast_day_rule = \"calendar\"\n").unwrap();
        assert_eq!(parsed.schedule.last_day_rule, LastDayRule::Calendar);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("schedule.step").as_deref(), Some("0:30"));
        assert_eq!(cfg.get("schedule.day_count").as_deref(), Some("5"));
        assert_eq!(cfg.get("schedule.lunch_enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("levels.0.label").as_deref(), Some("Full capacity"));
        assert!(cfg.get("schedule.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("schedule.step", "0:15").unwrap();
        cfg.set("schedule.day_count", "3").unwrap();
        cfg.set("schedule.lunch_enabled", "false").unwrap();
        cfg.set("schedule.row_class_cycle", r#"["a","b","c"]"#).unwrap();
        cfg.set("levels.1.label", "Swamped").unwrap();

        assert_eq!(cfg.schedule.step, "0:15");
        assert_eq!(cfg.schedule.day_count, 3);
        assert!(!cfg.schedule.lunch_enabled);
        assert_eq!(cfg.schedule.row_class_cycle, vec!["a", "b", "c"]);
        assert_eq!(cfg.levels[1].label, "Swamped");
    }

    #[test]
    fn set_enum_through_string() {
        let mut cfg = Config::default();
        cfg.set("schedule.last_day_rule", "calendar").unwrap();
        assert_eq!(cfg.schedule.last_day_rule, LastDayRule::Calendar);
        assert!(cfg.set("schedule.last_day_rule", "sometimes").is_err());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("schedule.nonexistent_key", "value"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("schedule.lunch_enabled", "not_a_bool").is_err());
        assert!(cfg.set("schedule.day_count", "five").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn default_schedule_validates() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(ScheduleConfig::default().slots_per_day(), 16);
    }

    #[test]
    fn zero_step_is_rejected() {
        let cfg = ScheduleConfig {
            step: "0:00".into(),
            ..ScheduleConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::NonPositiveStep("0:00".into()))
        );

        let garbage = ScheduleConfig {
            step: "half an hour".into(),
            ..ScheduleConfig::default()
        };
        assert!(matches!(
            garbage.validate(),
            Err(ValidationError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn zero_days_is_rejected() {
        let cfg = ScheduleConfig {
            day_count: 0,
            ..ScheduleConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ValidationError::ZeroDayCount));
    }

    #[test]
    fn day_count_is_capped() {
        let cfg = ScheduleConfig {
            day_count: MAX_DAY_COUNT,
            ..ScheduleConfig::default()
        };
        assert!(cfg.validate().is_ok());

        let cfg = ScheduleConfig {
            day_count: u32::MAX,
            ..ScheduleConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::DayCountTooLarge {
                count: u32::MAX,
                max: MAX_DAY_COUNT,
            })
        );
    }

    #[test]
    fn reversed_work_day_is_rejected() {
        let cfg = ScheduleConfig {
            work_start: "17:00".into(),
            work_end: "9:00".into(),
            ..ScheduleConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidWorkDay { .. })
        ));
    }

    #[test]
    fn work_day_past_midnight_is_rejected() {
        let cfg = ScheduleConfig {
            work_end: "24:30".into(),
            lunch_enabled: false,
            ..ScheduleConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::WorkDayPastMidnight("24:30".into()))
        );
    }

    #[test]
    fn lunch_past_work_end_is_rejected_only_when_enabled() {
        let mut cfg = ScheduleConfig {
            lunch_start: "16:30".into(),
            ..ScheduleConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::LunchOutsideWorkDay { .. })
        ));
        cfg.lunch_enabled = false;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn shortening_whole_day_is_rejected() {
        let cfg = ScheduleConfig {
            shorten_by: "8:00".into(),
            ..ScheduleConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::ShortenTooLarge {
                shorten_by: "8:00".into(),
                span: "08:00".into(),
            })
        );
    }

    #[test]
    fn derived_minutes() {
        let cfg = ScheduleConfig::default();
        assert_eq!(cfg.work_start_minutes(), 540);
        assert_eq!(cfg.work_end_minutes(), 1020);
        assert_eq!(cfg.lunch_end_minutes(), 780);
        assert_eq!(cfg.short_day_start_minutes(), 960);
        assert_eq!(cfg.step_minutes(), 30);
    }

    #[test]
    fn uneven_step_rounds_slot_count_up() {
        let cfg = ScheduleConfig {
            step: "0:45".into(),
            ..ScheduleConfig::default()
        };
        // 480 / 45 = 10.67 -> 11 slots, last one starting at 16:30
        assert_eq!(cfg.slots_per_day(), 11);
    }
}
