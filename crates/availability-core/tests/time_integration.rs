//! Property tests for the time helpers.

use availability_core::{minutes_of, text_of};
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip_within_a_day(m in 0i64..1440) {
        prop_assert_eq!(minutes_of(&text_of(m)), m);
    }

    #[test]
    fn text_is_zero_padded(m in 0i64..1440) {
        let text = text_of(m);
        prop_assert_eq!(text.len(), 5);
        prop_assert_eq!(&text[2..3], ":");
    }

    #[test]
    fn negative_minutes_format_as_midnight(m in i64::MIN..0) {
        prop_assert_eq!(text_of(m), "00:00");
    }

    #[test]
    fn text_without_colon_is_zero(s in "[0-9a-z ]{0,8}") {
        prop_assert_eq!(minutes_of(&s), 0);
    }
}

#[test]
fn unpadded_hours_parse() {
    assert_eq!(minutes_of("9:05"), 545);
    assert_eq!(text_of(minutes_of("9:05")), "09:05");
}
