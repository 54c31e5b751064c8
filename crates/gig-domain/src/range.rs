//! Inclusive reporting windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Inclusive `[start, end]` window of instants used to scope record queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days`-long window ending at `end`.
    pub fn trailing_days(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }

    /// Whole calendar days: midnight of `start` through the last millisecond of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| RangeError::Unrepresentable(end.to_string()))?;
        Self::new(
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(last_instant).and_utc(),
        )
    }

    /// Resolves an optional caller range, falling back to the trailing window ending `now`.
    pub fn or_trailing(range: Option<Self>, now: DateTime<Utc>, days: u32) -> Self {
        range.unwrap_or_else(|| Self::trailing_days(now, days))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Record dates are compared at midnight UTC, the instant they are stored as.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_rejects_inverted_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let err = DateRange::new(start, end).expect_err("inverted range");
        assert!(matches!(err, RangeError::EndBeforeStart { .. }));
    }

    #[test]
    fn bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end).unwrap();
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(range.contains_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!range.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn trailing_window_excludes_midnight_before_start() {
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 14, 0, 0).unwrap();
        let range = DateRange::trailing_days(now, 30);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap());
        assert!(!range.contains_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert!(range.contains_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()));
    }

    #[test]
    fn from_dates_covers_whole_days() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let range = DateRange::from_dates(first, last).unwrap();
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 7, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()));
    }
}
