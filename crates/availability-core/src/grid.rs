//! Schedule grid generation.
//!
//! Builds the day x slot grid for a start date: one day record per working
//! day, each holding the same stepped `[work_start, work_end)` slots. Every
//! slot is assigned by the classifier chain (first match wins).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::classifier::{
    Classification, CustomEventClassifier, LunchClassifier, RandomLevelClassifier,
    ShortDayClassifier, SlotClassifier, SlotContext,
};
use crate::error::{CoreError, Result};
use crate::events::EventRegistry;
use crate::levels::LevelCatalog;
use crate::storage::{Config, LastDayRule, ScheduleConfig};
use crate::time::text_of;

/// One time interval within a work day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// `"HH:MM"`
    pub start: String,
    /// `"HH:MM"`
    pub end: String,
    pub load_level: u32,
    /// A color, or `"none"`
    pub background_color: String,
    pub label: String,
    pub message: String,
}

impl TimeSlot {
    fn new(start: i64, step: i64, classification: Classification) -> Self {
        Self {
            start: text_of(start),
            end: classification.end.resolve(start, step),
            load_level: classification.level,
            background_color: classification.background,
            label: classification.label,
            message: classification.message,
        }
    }
}

/// One working day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    /// "Mon"
    pub short_name: String,
    /// "Oct"
    pub short_month: String,
    /// Day of month
    pub day_number: u32,
    pub slots: Vec<TimeSlot>,
}

/// Generated grid, one [`Day`] per working day in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Slots per day (taken from the first day).
    pub fn slot_count(&self) -> usize {
        self.days.first().map_or(0, |d| d.slots.len())
    }

    /// True when every day has the same slot count and slot times.
    pub fn is_aligned(&self) -> bool {
        let Some(first) = self.days.first() else {
            return true;
        };
        self.days.iter().all(|day| {
            day.slots.len() == first.slots.len()
                && day
                    .slots
                    .iter()
                    .zip(&first.slots)
                    .all(|(a, b)| a.start == b.start && a.end == b.end)
        })
    }

    /// Slot `index` of every day, for rendering one table row.
    pub fn row(&self, index: usize) -> Vec<&TimeSlot> {
        self.days.iter().filter_map(|d| d.slots.get(index)).collect()
    }
}

/// Schedule generation engine.
pub struct GridGenerator {
    config: ScheduleConfig,
    catalog: LevelCatalog,
    classifiers: Vec<Box<dyn SlotClassifier>>,
}

impl GridGenerator {
    /// Stock chain: lunch, short day, random level.
    pub fn new(config: ScheduleConfig, catalog: LevelCatalog, seed: Option<u64>) -> Self {
        Self::with_events(config, catalog, EventRegistry::new(), seed)
    }

    /// Stock chain with custom events ahead of the random pick.
    pub fn with_events(
        config: ScheduleConfig,
        catalog: LevelCatalog,
        events: EventRegistry,
        seed: Option<u64>,
    ) -> Self {
        let mut classifiers: Vec<Box<dyn SlotClassifier>> = Vec::new();
        if let Some(lunch) = LunchClassifier::from_config(&config, &catalog) {
            classifiers.push(Box::new(lunch));
        }
        if let Some(short_day) = ShortDayClassifier::from_config(&config, &catalog) {
            classifiers.push(Box::new(short_day));
        }
        if !events.is_empty() {
            classifiers.push(Box::new(CustomEventClassifier::new(events, catalog.clone())));
        }
        classifiers.push(Box::new(RandomLevelClassifier::new(
            catalog.levels.clone(),
            seed,
        )));

        Self::with_classifiers(config, catalog, classifiers)
    }

    /// Generator for a loaded [`Config`], including its custom events.
    pub fn from_config(config: &Config, seed: Option<u64>) -> Self {
        Self::with_events(
            config.schedule.clone(),
            config.catalog(),
            EventRegistry::from_events(config.custom_events.clone()),
            seed,
        )
    }

    /// Caller-supplied chain, evaluated in order.
    pub fn with_classifiers(
        config: ScheduleConfig,
        catalog: LevelCatalog,
        classifiers: Vec<Box<dyn SlotClassifier>>,
    ) -> Self {
        Self {
            config,
            catalog,
            classifiers,
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Build the grid starting on `start_date`.
    ///
    /// # Errors
    ///
    /// Fails fast when the schedule geometry or the catalog does not
    /// validate, or when a day falls outside the supported date range.
    pub fn generate(&mut self, start_date: NaiveDate) -> Result<Schedule> {
        self.config.validate()?;
        self.catalog.validate()?;
        for classifier in &self.classifiers {
            classifier.validate()?;
        }

        let work_start = self.config.work_start_minutes();
        let work_end = self.config.work_end_minutes();
        let step = self.config.step_minutes();
        let day_count = self.config.day_count;

        let mut days = Vec::new();
        for day_offset in 0..day_count {
            let date = start_date
                .checked_add_days(Days::new(u64::from(day_offset)))
                .ok_or_else(|| {
                    CoreError::Custom(format!("{start_date} + {day_offset} days is out of range"))
                })?;
            let is_last_day = self.is_last_day(start_date, date, day_offset);

            let mut slots = Vec::with_capacity(self.config.slots_per_day());
            let mut current = work_start;
            while current < work_end {
                let ctx = SlotContext {
                    date,
                    weekday: date.weekday(),
                    day_offset,
                    is_last_day,
                    start: current,
                };
                slots.push(TimeSlot::new(current, step, self.classify(&ctx)));
                current += step;
            }

            tracing::debug!(%date, is_last_day, slots = slots.len(), "generated day");
            days.push(Day {
                date,
                short_name: date.format("%a").to_string(),
                short_month: date.format("%b").to_string(),
                day_number: date.day(),
                slots,
            });
        }

        tracing::info!(
            %start_date,
            days = days.len(),
            slots_per_day = days.first().map_or(0, |d| d.slots.len()),
            "schedule generated"
        );
        Ok(Schedule { days })
    }

    /// Last-day check according to the configured rule.
    ///
    /// `DayOfMonth` compares raw day numbers, so a window that crosses a
    /// month boundary never matches.
    fn is_last_day(&self, start_date: NaiveDate, date: NaiveDate, day_offset: u32) -> bool {
        let day_count = self.config.day_count;
        match self.config.last_day_rule {
            LastDayRule::DayOfMonth => start_date
                .day()
                .checked_add(day_count.saturating_sub(1))
                .is_some_and(|last| date.day() == last),
            LastDayRule::Calendar => day_offset + 1 == day_count,
        }
    }

    fn classify(&mut self, ctx: &SlotContext) -> Classification {
        for classifier in self.classifiers.iter_mut() {
            if let Some(hit) = classifier.classify(ctx) {
                tracing::trace!(
                    classifier = classifier.name(),
                    start = ctx.start,
                    level = hit.level
                );
                return hit;
            }
        }
        self.fallback()
    }

    /// Level 0 (or the first catalog entry) when no classifier claims a slot.
    fn fallback(&self) -> Classification {
        self.catalog
            .get(0)
            .or_else(|| self.catalog.levels.first())
            .map(Classification::from_level)
            .unwrap_or_else(|| Classification::from_special(&self.catalog.end_of_week))
    }
}
