//! Wall-clock time helpers.
//!
//! All schedule geometry is expressed as minutes since midnight. Text input
//! is `"H:MM"` or `"HH:MM"`; output is always zero-padded `"HH:MM"`.

/// Minutes in one day; the grid never spans past this.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse `"H:MM"` / `"HH:MM"` into minutes since midnight.
///
/// Anything that is not two colon-separated non-negative integers yields 0.
/// Minutes are not range-checked, so `"0:90"` is 90.
pub fn minutes_of(text: &str) -> i64 {
    let mut parts = text.trim().split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    match (hours.trim().parse::<u32>(), minutes.trim().parse::<u32>()) {
        (Ok(h), Ok(m)) => i64::from(h) * 60 + i64::from(m),
        _ => 0,
    }
}

/// Format minutes since midnight as `"HH:MM"`.
///
/// Negative input yields `"00:00"`. Values past a day are not wrapped
/// (1450 formats as `"24:10"`), so callers that need a single day's span
/// must validate before formatting.
pub fn text_of(minutes: i64) -> String {
    if minutes < 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// True when `text` is `H:MM`: exactly two non-empty, all-digit parts.
pub(crate) fn is_clock_text(text: &str) -> bool {
    let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match text.trim().split_once(':') {
        Some((hours, minutes)) => is_number(hours) && is_number(minutes),
        None => false,
    }
}
