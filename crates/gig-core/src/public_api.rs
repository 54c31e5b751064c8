//! Stable, public-facing entry points that wrap the service layer.
//!
//! Each `api_*` function fetches one user's records from a [`RecordSource`],
//! scopes them to the requested window (or the trailing default), and hands
//! the result to the matching service. Frontends such as the CLI depend on
//! this surface rather than on individual services.

use gig_domain::{
    AnalyticsSettings, Dashboard, DateRange, EarningsReport, ExpenseReport, ForecastOutcome,
    HourlyRanking, PlatformReport, ProfitReport,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    bucket_service::BucketService, dashboard_service::DashboardService,
    forecast_service::ForecastService, hourly_service::HourlyService, storage::RecordSource,
    summary_service::SummaryService, time::Clock, CoreError,
};

/// Collaborators shared by every API call.
pub struct ApiContext<'a> {
    pub source: &'a dyn RecordSource,
    pub clock: &'a dyn Clock,
    pub settings: &'a AnalyticsSettings,
}

impl<'a> ApiContext<'a> {
    pub fn new(
        source: &'a dyn RecordSource,
        clock: &'a dyn Clock,
        settings: &'a AnalyticsSettings,
    ) -> Self {
        Self {
            source,
            clock,
            settings,
        }
    }

    /// The caller's range, or the configured trailing window ending now.
    pub fn resolve_range(&self, range: Option<DateRange>) -> DateRange {
        DateRange::or_trailing(range, self.clock.now(), self.settings.default_range_days)
    }
}

/// Profit summary and per-day profit for the window.
pub fn api_profit_report(
    ctx: &ApiContext<'_>,
    user: Uuid,
    range: Option<DateRange>,
) -> Result<ProfitReport, CoreError> {
    let range = ctx.resolve_range(range);
    let earnings = ctx.source.earnings(user, Some(&range))?;
    let expenses = ctx.source.expenses(user, Some(&range))?;
    info!(%user, earnings = earnings.len(), expenses = expenses.len(), "profit report");

    Ok(ProfitReport {
        summary: SummaryService::summarize(&earnings, &expenses),
        profit_by_date: BucketService::profit_by_date(&earnings, &expenses),
        range,
    })
}

pub fn api_platform_report(
    ctx: &ApiContext<'_>,
    user: Uuid,
    range: Option<DateRange>,
) -> Result<PlatformReport, CoreError> {
    let range = ctx.resolve_range(range);
    let earnings = ctx.source.earnings(user, Some(&range))?;
    info!(%user, earnings = earnings.len(), "platform report");

    Ok(PlatformReport {
        platforms: BucketService::platform_performance(&earnings),
        range,
    })
}

/// Earnings totals broken down by platform and by day. Expenses are not loaded.
pub fn api_earnings_report(
    ctx: &ApiContext<'_>,
    user: Uuid,
    range: Option<DateRange>,
) -> Result<EarningsReport, CoreError> {
    let range = ctx.resolve_range(range);
    let earnings = ctx.source.earnings(user, Some(&range))?;
    info!(%user, earnings = earnings.len(), "earnings report");

    Ok(EarningsReport {
        summary: SummaryService::summarize(&earnings, &[]),
        earnings_by_platform: BucketService::earnings_by_platform(&earnings),
        earnings_by_date: BucketService::earnings_by_date(&earnings),
        range,
    })
}

pub fn api_expense_report(
    ctx: &ApiContext<'_>,
    user: Uuid,
    range: Option<DateRange>,
) -> Result<ExpenseReport, CoreError> {
    let range = ctx.resolve_range(range);
    let expenses = ctx.source.expenses(user, Some(&range))?;
    info!(%user, expenses = expenses.len(), "expense report");

    Ok(ExpenseReport {
        summary: SummaryService::summarize_expenses(&expenses),
        expenses_by_category: BucketService::expenses_by_category(&expenses),
        expenses_by_date: BucketService::expenses_by_date(&expenses),
        range,
    })
}

/// Ranks weekday/hour slots over the user's full history.
pub fn api_optimal_hours(ctx: &ApiContext<'_>, user: Uuid) -> Result<HourlyRanking, CoreError> {
    let earnings = ctx.source.earnings(user, None)?;
    info!(%user, earnings = earnings.len(), "optimal hours");
    Ok(HourlyService::rank(&earnings, ctx.settings))
}

/// Projects the next two weeks from the user's full history.
pub fn api_earnings_prediction(
    ctx: &ApiContext<'_>,
    user: Uuid,
) -> Result<ForecastOutcome, CoreError> {
    let earnings = ctx.source.earnings(user, None)?;
    info!(%user, earnings = earnings.len(), "earnings prediction");
    Ok(ForecastService::forecast(&earnings, ctx.settings))
}

pub fn api_dashboard(ctx: &ApiContext<'_>, user: Uuid) -> Result<Dashboard, CoreError> {
    DashboardService::overview(ctx.source, user, ctx.clock, ctx.settings)
}
