//! # Availability Core Library
//!
//! This library provides the business logic behind the weekly availability
//! table: a grid of days by time slots, each slot tagged with a workload
//! level, a color and a descriptive tooltip. The CLI binary is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Time**: conversions between `"HH:MM"` text and minutes since midnight
//! - **Levels**: the workload level catalog plus the lunch and end-of-week states
//! - **Grid**: builds the day x slot grid through an ordered chain of
//!   slot classifiers (first match wins)
//! - **Style**: projects the catalog into a stylesheet as color variables
//!   and per-level class rules, idempotently
//! - **Render**: turns a generated schedule into an HTML table
//!
//! ## Key Components
//!
//! - [`GridGenerator`]: schedule generation engine
//! - [`StyleSynchronizer`]: color variable and class rule upserts
//! - [`Config`]: TOML configuration (schedule geometry, catalog, custom events)
//! - [`resolve_anchor`]: picks the Monday a schedule starts on

pub mod anchor;
pub mod classifier;
pub mod error;
pub mod events;
pub mod grid;
pub mod levels;
pub mod render;
pub mod storage;
pub mod style;
pub mod time;

pub use anchor::resolve_anchor;
pub use classifier::{
    Classification, CustomEventClassifier, LunchClassifier, RandomLevelClassifier,
    ShortDayClassifier, SlotClassifier, SlotContext, SlotEnd,
};
pub use error::{ConfigError, CoreError, StyleError, ValidationError};
pub use events::{CustomEvent, EventRegistry};
pub use grid::{Day, GridGenerator, Schedule, TimeSlot};
pub use levels::{LevelCatalog, SpecialState, WorkloadLevel};
pub use storage::{Config, LastDayRule, ScheduleConfig};
pub use style::{StyleSheet, StyleSink, StyleSynchronizer};
pub use time::{minutes_of, text_of};
