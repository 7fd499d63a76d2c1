//! Anchor date resolution.
//!
//! A schedule always starts on a Monday. Monday mornings keep today;
//! anything later moves to the following Monday.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Hour (local wall clock) after which Monday rolls to next week.
pub const MONDAY_CUTOFF_HOUR: u32 = 12;

/// Resolve the Monday a schedule generated at `now` starts on.
///
/// - Monday before noon: today
/// - Monday from noon on: next Monday
/// - Any other day: the upcoming Monday
pub fn resolve_anchor(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    if today.weekday() == Weekday::Mon && now.hour() < MONDAY_CUTOFF_HOUR {
        return today;
    }

    // Sun -> 1, Tue -> 6, ..., Sat -> 2, Mon -> 7
    let days_ahead = match (7 - today.weekday().num_days_from_monday()) % 7 {
        0 => 7,
        n => n,
    };
    today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(today)
}
