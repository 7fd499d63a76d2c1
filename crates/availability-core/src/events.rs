//! Custom events layered over the generated grid.
//!
//! A custom event pins a workload level to a weekday time range, replacing
//! whatever the default classifier would have picked for the slots it covers.
//! Events are keyed by `(day, begin)`; inserting over an existing key needs
//! an explicit replace.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{is_clock_text, minutes_of};

/// A workload assignment for a weekday time range `[begin, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub day: Weekday,
    /// `"HH:MM"`
    pub begin: String,
    /// `"HH:MM"`, exclusive
    pub end: String,
    pub level: u32,
    pub label: String,
    #[serde(default)]
    pub message: String,
}

impl CustomEvent {
    pub fn new(
        day: Weekday,
        begin: impl Into<String>,
        end: impl Into<String>,
        level: u32,
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            day,
            begin: begin.into(),
            end: end.into(),
            level,
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn begin_minutes(&self) -> i64 {
        minutes_of(&self.begin)
    }

    pub fn end_minutes(&self) -> i64 {
        minutes_of(&self.end)
    }

    /// True when a slot starting at `minute` on `day` falls inside the event.
    pub fn covers(&self, day: Weekday, minute: i64) -> bool {
        self.day == day && minute >= self.begin_minutes() && minute < self.end_minutes()
    }

    /// Reject events whose times are malformed or empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, text) in [("begin", &self.begin), ("end", &self.end)] {
            if !is_clock_text(text) {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("'{text}' is not an H:MM time"),
                });
            }
        }
        if self.begin_minutes() >= self.end_minutes() {
            return Err(ValidationError::InvalidValue {
                field: "end".into(),
                message: format!("{} must be after {}", self.end, self.begin),
            });
        }
        Ok(())
    }

    fn same_key(&self, day: Weekday, begin: &str) -> bool {
        self.day == day && self.begin_minutes() == minutes_of(begin)
    }
}

/// Outcome of [`EventRegistry::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// The previous event under the same key
    Replaced(CustomEvent),
    /// An event already exists and `replace` was false
    Exists(CustomEvent),
}

/// Ordered set of custom events keyed by `(day, begin)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRegistry {
    events: Vec<CustomEvent>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<CustomEvent>) -> Self {
        let mut registry = Self::new();
        for event in events {
            registry.insert(event, true);
        }
        registry
    }

    /// Add an event. An existing event with the same key is only
    /// overwritten when `replace` is true.
    pub fn insert(&mut self, event: CustomEvent, replace: bool) -> InsertOutcome {
        let existing = self
            .events
            .iter()
            .position(|e| e.same_key(event.day, &event.begin));

        match existing {
            Some(index) if replace => {
                let old = std::mem::replace(&mut self.events[index], event);
                InsertOutcome::Replaced(old)
            }
            Some(index) => InsertOutcome::Exists(self.events[index].clone()),
            None => {
                self.events.push(event);
                self.sort();
                InsertOutcome::Added
            }
        }
    }

    /// Remove the event starting at `begin` on `day`.
    pub fn remove(&mut self, day: Weekday, begin: &str) -> Option<CustomEvent> {
        let index = self.events.iter().position(|e| e.same_key(day, begin))?;
        Some(self.events.remove(index))
    }

    /// First event covering a slot starting at `minute` on `day`.
    pub fn find_covering(&self, day: Weekday, minute: i64) -> Option<&CustomEvent> {
        self.events.iter().find(|e| e.covers(day, minute))
    }

    /// Events sorted by weekday (Monday first) then begin time.
    pub fn list(&self) -> &[CustomEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CustomEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn sort(&mut self) {
        self.events
            .sort_by_key(|e| (e.day.num_days_from_monday(), e.begin_minutes()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standup(level: u32) -> CustomEvent {
        CustomEvent::new(Weekday::Tue, "10:00", "10:30", level, "Standup", "Daily sync")
    }

    #[test]
    fn covers_half_open_range() {
        let event = standup(3);
        assert!(event.covers(Weekday::Tue, 600));
        assert!(event.covers(Weekday::Tue, 629));
        assert!(!event.covers(Weekday::Tue, 630));
        assert!(!event.covers(Weekday::Wed, 600));
    }

    #[test]
    fn insert_refuses_existing_key_without_replace() {
        let mut registry = EventRegistry::new();
        assert_eq!(registry.insert(standup(3), false), InsertOutcome::Added);
        assert_eq!(
            registry.insert(standup(5), false),
            InsertOutcome::Exists(standup(3))
        );
        assert_eq!(registry.list()[0].level, 3);
    }

    #[test]
    fn insert_with_replace_returns_previous() {
        let mut registry = EventRegistry::new();
        registry.insert(standup(3), false);
        assert_eq!(
            registry.insert(standup(5), true),
            InsertOutcome::Replaced(standup(3))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].level, 5);
    }

    #[test]
    fn key_compares_times_not_text() {
        let mut registry = EventRegistry::new();
        registry.insert(CustomEvent::new(Weekday::Mon, "9:00", "9:30", 1, "A", ""), false);
        let outcome =
            registry.insert(CustomEvent::new(Weekday::Mon, "09:00", "10:00", 2, "B", ""), false);
        assert!(matches!(outcome, InsertOutcome::Exists(_)));
    }

    #[test]
    fn list_is_sorted_by_day_then_time() {
        let mut registry = EventRegistry::new();
        registry.insert(CustomEvent::new(Weekday::Fri, "9:00", "10:00", 1, "Fri", ""), false);
        registry.insert(CustomEvent::new(Weekday::Mon, "14:00", "15:00", 1, "Mon late", ""), false);
        registry.insert(CustomEvent::new(Weekday::Mon, "9:00", "10:00", 1, "Mon early", ""), false);

        let labels: Vec<_> = registry.list().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Mon early", "Mon late", "Fri"]);
    }

    #[test]
    fn remove_by_key() {
        let mut registry = EventRegistry::from_events(vec![standup(3)]);
        assert!(registry.remove(Weekday::Mon, "10:00").is_none());
        assert_eq!(registry.remove(Weekday::Tue, "10:00"), Some(standup(3)));
        assert!(registry.is_empty());
    }

    #[test]
    fn validate_rejects_bad_times() {
        assert!(standup(1).validate().is_ok());
        let reversed = CustomEvent::new(Weekday::Tue, "11:00", "10:00", 1, "x", "");
        assert!(reversed.validate().is_err());
        let garbage = CustomEvent::new(Weekday::Tue, "ten", "11:00", 1, "x", "");
        assert!(garbage.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_numeric_clock_parts() {
        let letters = CustomEvent::new(Weekday::Mon, "xx:yy", "11:00", 4, "x", "");
        assert!(letters.validate().is_err());
        let missing_minutes = CustomEvent::new(Weekday::Mon, "9:", "11:00", 4, "x", "");
        assert!(missing_minutes.validate().is_err());
        let bad_end = CustomEvent::new(Weekday::Mon, "9:00", "11:zz", 4, "x", "");
        assert!(bad_end.validate().is_err());
    }
}
