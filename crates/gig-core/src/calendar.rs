//! ISO-8601 week arithmetic.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use gig_domain::WeekStartPolicy;

/// ISO week number of `date`: week 1 is the week holding the year's first Thursday.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// `(ISO year, ISO week)` for `date`. Late-December and early-January dates can
/// belong to a neighbouring ISO year, so the calendar year is not used here.
pub fn iso_week_key(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// Start date of ISO `week` in ISO `year` under `policy`.
///
/// Returns `None` when the pair does not exist (week 53 of a 52-week year) or
/// the year is outside the representable range.
pub fn date_of_iso_week(week: u32, year: i32, policy: WeekStartPolicy) -> Option<NaiveDate> {
    match policy {
        WeekStartPolicy::Iso => NaiveDate::from_isoywd_opt(year, week, Weekday::Mon),
        WeekStartPolicy::Legacy => legacy_week_start(week, year),
    }
}

// Anchors on `8 - weekday(Jan 1)` counted from Sunday, which lands on the first
// Sunday after January 1st (or January 1st itself when it is a Sunday). Week 1
// collapses to January 1st whenever that anchor is later in the month.
fn legacy_week_start(week: u32, year: i32) -> Option<NaiveDate> {
    let january_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let weekday = january_first.weekday().num_days_from_sunday();
    let days_offset = if weekday > 0 { 8 - weekday } else { 1 };
    let anchor = NaiveDate::from_ymd_opt(year, 1, days_offset)?;

    if week == 1 && anchor.day() > 1 {
        return Some(january_first);
    }

    let weeks_offset = i64::from(week) - 1;
    anchor.checked_add_signed(Duration::weeks(weeks_offset))
}
