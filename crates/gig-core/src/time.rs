use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Source of "now" for range defaults and dashboard periods.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date at `now` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Calendar date at `now` on a wall clock running at `offset`.
    fn today_in(&self, offset: FixedOffset) -> NaiveDate {
        self.now().with_timezone(&offset).date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pins "now" to one instant; used by tests and the CLI's `--as-of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_follows_offset() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 2, 30, 0).unwrap());
        let west = FixedOffset::west_opt(5 * 3_600).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(clock.today_in(west), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
