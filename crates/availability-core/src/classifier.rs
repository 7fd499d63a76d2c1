//! Slot classifiers.
//!
//! Each grid slot is assigned by an ordered chain of classifiers; the first
//! one that returns `Some` wins. The stock chain is lunch, short last day,
//! custom events, then a uniform random pick from the catalog as the
//! placeholder fallback.

use chrono::{NaiveDate, Weekday};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::error::ValidationError;
use crate::events::{CustomEvent, EventRegistry};
use crate::levels::{LevelCatalog, SpecialState, WorkloadLevel};
use crate::storage::ScheduleConfig;
use crate::time::{is_clock_text, text_of};

/// Background marker for slots without their own color.
pub const NO_BACKGROUND: &str = "none";

/// Upper bound (exclusive) for a numeric end override, in minutes.
const MAX_END_OVERRIDE_MINUTES: i64 = 7200;

/// Where a slot being classified sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotContext {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// 0 for the first day of the schedule
    pub day_offset: u32,
    pub is_last_day: bool,
    /// Slot start, minutes since midnight
    pub start: i64,
}

/// Explicit end time for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotEnd {
    /// `start + step`
    #[default]
    Default,
    /// Used verbatim when shaped like `H:MM`
    Text(String),
    /// Minutes since midnight, honored in `(0, 7200)`
    Minutes(i64),
}

impl SlotEnd {
    /// Resolve to `"HH:MM"`; unusable overrides fall back to `start + step`.
    pub fn resolve(&self, start: i64, step: i64) -> String {
        match self {
            SlotEnd::Text(text) if is_clock_text(text) => text.clone(),
            SlotEnd::Minutes(m) if *m > 0 && *m < MAX_END_OVERRIDE_MINUTES => text_of(*m),
            _ => text_of(start + step),
        }
    }
}

/// What a classifier decided for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub level: u32,
    pub label: String,
    pub message: String,
    /// A color, or [`NO_BACKGROUND`]
    pub background: String,
    pub end: SlotEnd,
}

impl Classification {
    pub fn from_special(state: &SpecialState) -> Self {
        Self {
            level: state.level,
            label: state.label.clone(),
            message: state.message.clone(),
            background: NO_BACKGROUND.to_string(),
            end: SlotEnd::Default,
        }
    }

    pub fn from_level(level: &WorkloadLevel) -> Self {
        Self {
            level: level.level,
            label: level.label.clone(),
            message: level.message.clone(),
            background: level.background_color.clone(),
            end: SlotEnd::Default,
        }
    }

    pub fn with_end(mut self, end: SlotEnd) -> Self {
        self.end = end;
        self
    }
}

/// One rule in the slot assignment chain.
pub trait SlotClassifier {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return `Some` to claim the slot.
    fn classify(&mut self, ctx: &SlotContext) -> Option<Classification>;

    /// Check the rule's own inputs before any slot is classified.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Tags slots inside `[start, end)` with the lunch state.
#[derive(Debug, Clone)]
pub struct LunchClassifier {
    start: i64,
    end: i64,
    state: SpecialState,
}

impl LunchClassifier {
    pub fn new(start: i64, end: i64, state: SpecialState) -> Self {
        Self { start, end, state }
    }

    /// `None` when lunch is disabled.
    pub fn from_config(config: &ScheduleConfig, catalog: &LevelCatalog) -> Option<Self> {
        config.lunch_enabled.then(|| {
            Self::new(
                config.lunch_start_minutes(),
                config.lunch_end_minutes(),
                catalog.lunch.clone(),
            )
        })
    }
}

impl SlotClassifier for LunchClassifier {
    fn name(&self) -> &'static str {
        "lunch"
    }

    fn classify(&mut self, ctx: &SlotContext) -> Option<Classification> {
        (ctx.start >= self.start && ctx.start < self.end)
            .then(|| Classification::from_special(&self.state))
    }
}

/// Tags the tail of the last day with the end-of-week state.
#[derive(Debug, Clone)]
pub struct ShortDayClassifier {
    from: i64,
    state: SpecialState,
}

impl ShortDayClassifier {
    pub fn new(from: i64, state: SpecialState) -> Self {
        Self { from, state }
    }

    /// `None` when the last day is not shortened.
    pub fn from_config(config: &ScheduleConfig, catalog: &LevelCatalog) -> Option<Self> {
        config.shorten_last_day.then(|| {
            Self::new(
                config.short_day_start_minutes(),
                catalog.end_of_week.clone(),
            )
        })
    }
}

impl SlotClassifier for ShortDayClassifier {
    fn name(&self) -> &'static str {
        "short_day"
    }

    fn classify(&mut self, ctx: &SlotContext) -> Option<Classification> {
        (ctx.is_last_day && ctx.start >= self.from)
            .then(|| Classification::from_special(&self.state))
    }
}

/// Applies registered custom events.
///
/// The slot keeps its stepped end time so rows stay aligned across days.
#[derive(Debug, Clone)]
pub struct CustomEventClassifier {
    registry: EventRegistry,
    catalog: LevelCatalog,
}

impl CustomEventClassifier {
    pub fn new(registry: EventRegistry, catalog: LevelCatalog) -> Self {
        Self { registry, catalog }
    }
}

impl SlotClassifier for CustomEventClassifier {
    fn name(&self) -> &'static str {
        "custom_event"
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.registry.list().iter().try_for_each(CustomEvent::validate)
    }

    fn classify(&mut self, ctx: &SlotContext) -> Option<Classification> {
        let event = self.registry.find_covering(ctx.weekday, ctx.start)?;
        let background = self
            .catalog
            .get(event.level)
            .map(|l| l.background_color.clone())
            .unwrap_or_else(|| NO_BACKGROUND.to_string());

        Some(Classification {
            level: event.level,
            label: event.label.clone(),
            message: event.message.clone(),
            background,
            end: SlotEnd::Default,
        })
    }
}

/// Uniform random pick from the catalog.
///
/// Placeholder data for demos; deployments are expected to put their own
/// classifiers ahead of it.
#[derive(Debug, Clone)]
pub struct RandomLevelClassifier {
    levels: Vec<WorkloadLevel>,
    rng: Mcg128Xsl64,
}

impl RandomLevelClassifier {
    /// `seed = None` seeds from entropy.
    pub fn new(levels: Vec<WorkloadLevel>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { levels, rng }
    }
}

impl SlotClassifier for RandomLevelClassifier {
    fn name(&self) -> &'static str {
        "random_level"
    }

    fn classify(&mut self, _ctx: &SlotContext) -> Option<Classification> {
        self.levels
            .choose(&mut self.rng)
            .map(Classification::from_level)
    }
}
