// Unit tests for the conjuncture date default

use crate::dataset::dates::{format_conjuncture_date, is_monday, last_full_week_monday};

use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// **VALUE**: Verifies the default is the Monday of the last completed week.
///
/// **WHY THIS MATTERS**: The portal publishes conjuncture weekly; asking for
/// the current week returns nothing until it closes.
///
/// **BUG THIS CATCHES**: Would catch returning this week's Monday, or
/// mis-handling Sunday as the first day of the week.
#[test]
fn given_days_across_a_week_when_defaulting_then_returns_previous_monday() {
    // 2025-08-04 is a Monday
    assert_eq!(last_full_week_monday(date(2025, 8, 4)), date(2025, 7, 28));
    assert_eq!(last_full_week_monday(date(2025, 8, 6)), date(2025, 7, 28));
    assert_eq!(last_full_week_monday(date(2025, 8, 10)), date(2025, 7, 28));
    assert_eq!(last_full_week_monday(date(2025, 8, 11)), date(2025, 8, 4));
}

/// **VALUE**: Verifies the default crosses month and year boundaries.
///
/// **WHY THIS MATTERS**: Date arithmetic done on day-of-month breaks in early January.
///
/// **BUG THIS CATCHES**: Would catch manual day subtraction without carry.
#[test]
fn given_early_january_when_defaulting_then_returns_monday_of_previous_year() {
    let monday = last_full_week_monday(date(2026, 1, 2));

    assert_eq!(monday, date(2025, 12, 22));
    assert!(is_monday(monday));
    assert_eq!(format_conjuncture_date(monday), "2025-12-22");
}
