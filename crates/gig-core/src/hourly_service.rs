//! Weekday by hour-of-day profitability grid and its top slots.
//!
//! Each session's overall earnings rate is credited in full to every clock hour
//! the session touches, and all of those hours are filed under the weekday the
//! session started on. A 23:00-01:00 shift therefore adds the same rate to
//! hours 23, 0 and 1 of its starting day; the rate is not split by time spent
//! in each hour.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use gig_domain::{
    AnalyticsSettings, EarningRecord, HourlyGrid, HourlyRanking, OptimalHour, WEEKDAY_NAMES,
};
use tracing::debug;

use crate::summary_service::ratio;

const MAX_EXTRA_HOURS: i64 = 23;

pub struct HourlyService;

impl HourlyService {
    pub fn rank(earnings: &[EarningRecord], settings: &AnalyticsSettings) -> HourlyRanking {
        if earnings.is_empty() {
            return HourlyRanking::InsufficientData {
                message: "Not enough earnings data to calculate optimal hours".into(),
                optimal_hours: Vec::new(),
                grid: HourlyGrid::default(),
            };
        }

        let grid = Self::build_grid(earnings, settings.offset());
        let optimal_hours = Self::top_slots(
            &grid,
            settings.top_hours,
            settings.confidence_saturation_sessions,
        );
        debug!(
            sessions = earnings.len(),
            ranked = optimal_hours.len(),
            "ranked hourly profitability"
        );

        HourlyRanking::Ranked {
            optimal_hours,
            grid,
        }
    }

    /// Accumulates every session into the grid, then derives each cell's average.
    pub fn build_grid(earnings: &[EarningRecord], offset: FixedOffset) -> HourlyGrid {
        let mut grid = HourlyGrid::default();

        for record in earnings {
            let start = record.start_time.with_timezone(&offset);
            let end = record.end_time.with_timezone(&offset);
            let weekday = start.weekday().num_days_from_sunday() as usize;
            let rate = session_rate(record);

            for hour in touched_hours(start, end) {
                let cell = &mut grid.cells[weekday][hour];
                cell.total_rate += rate;
                cell.count += 1;
            }
        }

        for cell in grid.cells.iter_mut().flatten() {
            cell.avg_earnings_per_hour = if cell.count > 0 {
                cell.total_rate / f64::from(cell.count)
            } else {
                0.0
            };
        }
        grid
    }

    /// Observed slots ordered by average rate, highest first, capped at `limit`.
    ///
    /// Equal averages keep grid order: Sunday before Monday, earlier hours first.
    pub fn top_slots(grid: &HourlyGrid, limit: usize, saturation: u32) -> Vec<OptimalHour> {
        let mut observed: Vec<(usize, usize, f64, u32)> = grid
            .cells
            .iter()
            .enumerate()
            .flat_map(|(weekday, row)| {
                row.iter().enumerate().filter_map(move |(hour, cell)| {
                    (cell.count > 0).then_some((
                        weekday,
                        hour,
                        cell.avg_earnings_per_hour,
                        cell.count,
                    ))
                })
            })
            .collect();
        observed.sort_by(|a, b| b.2.total_cmp(&a.2));

        observed
            .into_iter()
            .take(limit)
            .map(|(weekday, hour, avg, count)| OptimalHour {
                day: WEEKDAY_NAMES[weekday].to_string(),
                hour: hour_label(hour),
                weekday_index: weekday as u8,
                hour_index: hour as u8,
                avg_earnings_per_hour: avg,
                sessions: count,
                confidence: slot_confidence(count, saturation),
            })
            .collect()
    }
}

/// Whole-session earnings rate; a session with no recorded hours earns a rate of 0.
pub fn session_rate(record: &EarningRecord) -> f64 {
    ratio(record.total_earning, record.hours())
}

/// Linear confidence in an hourly slot that saturates at `saturation` sessions.
pub fn slot_confidence(count: u32, saturation: u32) -> f64 {
    if saturation == 0 {
        return 1.0;
    }
    (f64::from(count) / f64::from(saturation)).min(1.0)
}

pub fn hour_label(hour: usize) -> String {
    format!("{}:00 - {}:00", hour, hour + 1)
}

/// Clock hours from the start hour through the end hour inclusive, wrapped into 0..24.
///
/// Hours are read from the wall clock, so any crossing of an hour boundary counts.
/// Inverted spans touch only the start hour; spans over a day touch each hour once.
fn touched_hours(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> impl Iterator<Item = usize> {
    let start_hour = i64::from(start.hour());
    let days = (end.date_naive() - start.date_naive()).num_days();
    let extra = (days * 24 + i64::from(end.hour()) - start_hour).clamp(0, MAX_EXTRA_HOURS);

    (start_hour..=start_hour + extra).map(|hour| hour.rem_euclid(24) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Offset, TimeZone, Utc, Weekday};
    use gig_domain::Platform;
    use uuid::Uuid;

    fn session(start: DateTime<Utc>, minutes: i64, total: f64) -> EarningRecord {
        EarningRecord::new(
            Uuid::nil(),
            Platform::DoorDash,
            start.date_naive(),
            start,
            start + Duration::minutes(minutes),
            total,
            0.0,
            0.0,
        )
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn overnight_session_wraps_into_start_weekday() {
        // Friday 2024-03-01 23:00 until Saturday 01:00.
        let record = session(utc(2024, 3, 1, 23, 0), 120, 50.0);
        let ranking = HourlyService::rank(&[record], &AnalyticsSettings::default());
        let grid = ranking.grid();

        let expected = 25.0;
        for hour in [23, 0, 1] {
            let cell = grid.cell_for(Weekday::Fri, hour).unwrap();
            assert_eq!(cell.count, 1);
            assert_eq!(cell.avg_earnings_per_hour, expected);
        }
        assert_eq!(grid.cell_for(Weekday::Sat, 0).unwrap().count, 0);
        assert_eq!(grid.cell_for(Weekday::Fri, 2).unwrap().count, 0);
        assert_eq!(ranking.optimal_hours().len(), 3);
    }

    #[test]
    fn partial_hours_touch_each_clock_hour() {
        let record = session(utc(2024, 3, 4, 11, 45), 30, 20.0);
        let grid = HourlyService::build_grid(&[record], Utc.fix());
        assert_eq!(grid.cell_for(Weekday::Mon, 11).unwrap().count, 1);
        assert_eq!(grid.cell_for(Weekday::Mon, 12).unwrap().count, 1);
        assert_eq!(grid.cell_for(Weekday::Mon, 13).unwrap().count, 0);
    }

    #[test]
    fn zero_hour_session_contributes_zero_rate() {
        let record = session(utc(2024, 3, 4, 9, 0), 0, 40.0);
        let grid = HourlyService::build_grid(&[record], Utc.fix());
        let cell = grid.cell_for(Weekday::Mon, 9).unwrap();
        assert_eq!(cell.count, 1);
        assert_eq!(cell.avg_earnings_per_hour, 0.0);
    }

    #[test]
    fn top_slots_capped_and_exclude_unobserved_cells() {
        let base = utc(2024, 3, 3, 6, 0);
        let records: Vec<EarningRecord> = (0..5)
            .map(|day| session(base + Duration::days(day), 6 * 60, 60.0 + day as f64))
            .collect();
        let ranking = HourlyService::rank(&records, &AnalyticsSettings::default());
        let top = ranking.optimal_hours();

        assert_eq!(top.len(), 10);
        assert!(top.iter().all(|slot| slot.sessions > 0));
        assert!(top
            .windows(2)
            .all(|pair| pair[0].avg_earnings_per_hour >= pair[1].avg_earnings_per_hour));
        assert_eq!(top[0].day, "Thursday");
        assert_eq!(top[0].hour, "6:00 - 7:00");
    }

    #[test]
    fn confidence_saturates_at_five_sessions() {
        assert_eq!(slot_confidence(1, 5), 0.2);
        assert_eq!(slot_confidence(5, 5), 1.0);
        assert_eq!(slot_confidence(10, 5), 1.0);
    }

    #[test]
    fn offset_shifts_hour_and_weekday() {
        // Sunday 02:00 UTC is Saturday 21:00 at UTC-5.
        let record = session(utc(2024, 3, 3, 2, 0), 30, 10.0);
        let offset = FixedOffset::west_opt(5 * 3_600).unwrap();
        let grid = HourlyService::build_grid(&[record], offset);
        assert_eq!(grid.cell_for(Weekday::Sat, 21).unwrap().count, 1);
        assert_eq!(grid.cell_for(Weekday::Sun, 2).unwrap().count, 0);
    }

    #[test]
    fn empty_history_is_insufficient() {
        let ranking = HourlyService::rank(&[], &AnalyticsSettings::default());
        assert!(matches!(ranking, HourlyRanking::InsufficientData { .. }));
        assert!(ranking.optimal_hours().is_empty());
        assert!(ranking.grid().cells.iter().flatten().all(|cell| cell.count == 0));

        let json = serde_json::to_value(&ranking).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
        assert_eq!(json["optimal_hours"], serde_json::json!([]));
        assert_eq!(json["grid"]["cells"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn sub_second_crossing_reaches_end_hour() {
        let start = utc(2024, 3, 4, 9, 59) + Duration::milliseconds(59_600);
        let record = EarningRecord::new(
            Uuid::nil(),
            Platform::DoorDash,
            start.date_naive(),
            start,
            start + Duration::milliseconds(500),
            5.0,
            0.0,
            0.0,
        );
        let grid = HourlyService::build_grid(&[record], Utc.fix());
        assert_eq!(grid.cell_for(Weekday::Mon, 9).unwrap().count, 1);
        assert_eq!(grid.cell_for(Weekday::Mon, 10).unwrap().count, 1);
        assert_eq!(grid.cell_for(Weekday::Mon, 11).unwrap().count, 0);
    }
}
