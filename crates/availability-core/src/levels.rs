//! Workload level catalog.
//!
//! The catalog is an ordered list of workload levels plus two special
//! states (lunch and end of week) that sit outside the random pick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One rank of busyness with its label, narrative message and colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadLevel {
    /// Lookup key for styling; unique within a catalog
    pub level: u32,
    /// Short name (e.g. "Full capacity")
    pub label: String,
    /// Longer narrative shown in the tooltip
    pub message: String,
    pub background_color: String,
    pub text_color: String,
}

impl WorkloadLevel {
    pub fn new(
        level: u32,
        label: impl Into<String>,
        message: impl Into<String>,
        background_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        Self {
            level,
            label: label.into(),
            message: message.into(),
            background_color: background_color.into(),
            text_color: text_color.into(),
        }
    }
}

/// A slot state outside the workload catalog.
///
/// Carries no colors of its own; styling falls back to the catalog entry
/// with the same level (level 0 for both defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialState {
    pub level: u32,
    pub label: String,
    pub message: String,
}

impl SpecialState {
    pub fn new(level: u32, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn lunch() -> Self {
        Self::new(
            0,
            "Lunch time",
            "A break from the madness, where food becomes the hero of the day!",
        )
    }

    pub fn end_of_week() -> Self {
        Self::new(
            0,
            "Have a great weekend",
            "Finally, a little rest from your faces...",
        )
    }
}

/// The six stock workload levels, busiest first.
pub fn default_levels() -> Vec<WorkloadLevel> {
    vec![
        WorkloadLevel::new(
            5,
            "Full capacity",
            "Hands in oil, stuck in a mess, I love cars...",
            "#2C3E50",
            "#FFFFFF",
        ),
        WorkloadLevel::new(
            4,
            "Very busy",
            "Sweating a little, but I can still knock out something during a break.",
            "#E74C3C",
            "#000000",
        ),
        WorkloadLevel::new(
            3,
            "Moderate load",
            "I can still take on 1/3 of the workload.",
            "#E67E22",
            "#000000",
        ),
        WorkloadLevel::new(2, "Light load", "I can double my tasks.", "#F1C40F", "#000000"),
        WorkloadLevel::new(
            1,
            "Very light load",
            "Scratching my right egg through the left pant leg of my colleague next to me, using a folding fork...",
            "#9B59B6",
            "#FFFFFF",
        ),
        WorkloadLevel::new(
            0,
            "Stay home",
            "Would have been better staying in bed than dragging my butt here.",
            "#7F8C8D",
            "#FFFFFF",
        ),
    ]
}

/// Ordered workload levels plus the lunch and end-of-week states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<WorkloadLevel>,
    pub lunch: SpecialState,
    pub end_of_week: SpecialState,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            lunch: SpecialState::lunch(),
            end_of_week: SpecialState::end_of_week(),
        }
    }
}

impl LevelCatalog {
    pub fn new(levels: Vec<WorkloadLevel>, lunch: SpecialState, end_of_week: SpecialState) -> Self {
        Self {
            levels,
            lunch,
            end_of_week,
        }
    }

    /// Find a level by its number.
    pub fn get(&self, level: u32) -> Option<&WorkloadLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// Background color for a level, falling back to level 0.
    pub fn color_for(&self, level: u32) -> Option<&str> {
        self.get(level)
            .or_else(|| self.get(0))
            .map(|l| l.background_color.as_str())
    }

    /// Highest level number in the catalog (0 when empty).
    pub fn max_level(&self) -> u32 {
        self.levels.iter().map(|l| l.level).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Reject an empty catalog or repeated level numbers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.levels.is_empty() {
            return Err(ValidationError::EmptyCollection("workload levels".into()));
        }
        let mut seen = HashSet::new();
        for level in &self.levels {
            if !seen.insert(level.level) {
                return Err(ValidationError::DuplicateLevel(level.level));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_six_unique_levels() {
        let catalog = LevelCatalog::default();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.max_level(), 5);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn color_falls_back_to_level_zero() {
        let catalog = LevelCatalog::default();
        assert_eq!(catalog.color_for(4), Some("#E74C3C"));
        assert_eq!(catalog.color_for(42), Some("#7F8C8D"));
    }

    #[test]
    fn duplicate_levels_are_rejected() {
        let mut catalog = LevelCatalog::default();
        catalog.levels.push(WorkloadLevel::new(3, "Again", "", "#000", "#fff"));
        assert_eq!(catalog.validate(), Err(ValidationError::DuplicateLevel(3)));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let catalog = LevelCatalog::new(
            Vec::new(),
            SpecialState::lunch(),
            SpecialState::end_of_week(),
        );
        assert!(matches!(
            catalog.validate(),
            Err(ValidationError::EmptyCollection(_))
        ));
        assert_eq!(catalog.color_for(0), None);
    }
}
