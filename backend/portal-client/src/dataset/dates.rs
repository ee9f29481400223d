use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Date format the conjuncture dataset expects.
pub const CONJUNCTURE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Monday of the most recently completed week (Monday-to-Sunday) before `today`.
///
/// On any day of the current week this is the Monday seven days before the
/// current week's Monday.
pub fn last_full_week_monday(today: NaiveDate) -> NaiveDate {
    let since_monday = u64::from(today.weekday().num_days_from_monday());
    today - Days::new(since_monday + 7)
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

pub fn format_conjuncture_date(date: NaiveDate) -> String {
    date.format(CONJUNCTURE_DATE_FORMAT).to_string()
}
