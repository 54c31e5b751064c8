use chrono::{Datelike, Duration, NaiveDate};
use gig_domain::{
    AnalyticsSettings, Dashboard, DateRange, EarningRecord, ExpenseRecord, PeriodSummaries,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    bucket_service::BucketService, storage::RecordSource, summary_service::SummaryService,
    time::Clock, CoreError,
};

const CHART_DAYS: i64 = 30;

/// Start dates of the periods shown on the overview, all ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStarts {
    pub today: NaiveDate,
    /// Sunday on or before today.
    pub week: NaiveDate,
    pub month: NaiveDate,
    pub year: NaiveDate,
}

impl PeriodStarts {
    pub fn for_day(today: NaiveDate) -> Self {
        let week = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        Self {
            today,
            week,
            month: today.with_day(1).unwrap_or(today),
            year: today.with_ordinal(1).unwrap_or(today),
        }
    }
}

pub struct DashboardService;

impl DashboardService {
    pub fn overview(
        source: &dyn RecordSource,
        user: Uuid,
        clock: &dyn Clock,
        settings: &AnalyticsSettings,
    ) -> Result<Dashboard, CoreError> {
        let today = clock.today_in(settings.offset());
        let starts = PeriodStarts::for_day(today);

        let period = |start| records_between(source, user, start, today);
        let summarize =
            |(earnings, expenses): &Records| SummaryService::summarize(earnings, expenses);

        let month = period(starts.month)?;
        let summaries = PeriodSummaries {
            today: summarize(&period(starts.today)?),
            week: summarize(&period(starts.week)?),
            month: summarize(&month),
            year: summarize(&period(starts.year)?),
        };
        let platform_performance = BucketService::platform_performance(&month.0);

        let chart_range = DateRange::from_dates(today - Duration::days(CHART_DAYS), today)?;
        let daily_earnings =
            BucketService::earnings_by_date(&source.earnings(user, Some(&chart_range))?);

        let year_end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
        let year_range = DateRange::from_dates(starts.year, year_end)?;
        let monthly_earnings =
            BucketService::monthly_totals(&source.earnings(user, Some(&year_range))?);
        let monthly_expenses =
            BucketService::monthly_totals(&source.expenses(user, Some(&year_range))?);

        let limit = settings.recent_activity_limit;
        let recent_earnings = most_recent(source.earnings(user, None)?, limit, |record| {
            (record.date, record.start_time.timestamp())
        });
        let recent_expenses =
            most_recent(source.expenses(user, None)?, limit, |record| (record.date, 0));

        debug!(
            %user,
            %today,
            platforms = platform_performance.len(),
            chart_days = daily_earnings.len(),
            "built dashboard overview"
        );

        Ok(Dashboard {
            summaries,
            platform_performance,
            daily_earnings,
            monthly_earnings,
            monthly_expenses,
            recent_earnings,
            recent_expenses,
        })
    }
}

type Records = (Vec<EarningRecord>, Vec<ExpenseRecord>);

fn records_between(
    source: &dyn RecordSource,
    user: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Records, CoreError> {
    let range = DateRange::from_dates(start, end)?;
    Ok((
        source.earnings(user, Some(&range))?,
        source.expenses(user, Some(&range))?,
    ))
}

/// Newest first by `key`, keeping input order among equal keys.
fn most_recent<T, K: Ord>(mut records: Vec<T>, limit: usize, key: impl Fn(&T) -> K) -> Vec<T> {
    records.sort_by(|a, b| key(b).cmp(&key(a)));
    records.truncate(limit);
    records
}
