//! Command-line surface over the analytics API.
//!
//! Every command prints one pretty JSON document on stdout.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use gig_config::{Config, ConfigManager};
use gig_core::{
    api_dashboard, api_earnings_prediction, api_earnings_report, api_expense_report,
    api_optimal_hours, api_platform_report, api_profit_report, ApiContext, Clock, CoreError,
    FixedClock, SystemClock,
};
use gig_domain::DateRange;
use gig_storage_json::JsonRecordSource;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{errors::AppError, utils::build_info};

/// Earnings analytics and forecasting for gig delivery work.
#[derive(Debug, Parser)]
#[command(name = "gig_insights_cli", author, version, about, long_about = None)]
pub struct Cli {
    /// Records file; defaults to the configured data file.
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// User whose records are analysed; optional when the file holds one user.
    #[arg(long, global = true, value_name = "UUID")]
    pub user: Option<Uuid>,

    /// Configuration directory; defaults to $GIG_INSIGHTS_HOME or ~/.gig_insights.
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today, ending at its last second.
    #[arg(long, global = true, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Profit summary and per-day profit.
    Profit(RangeArgs),
    /// Per-platform performance.
    Platforms(RangeArgs),
    /// Earnings by platform and by day.
    Earnings(RangeArgs),
    /// Expenses by category and by day.
    Expenses(RangeArgs),
    /// Most profitable weekday/hour slots.
    Hours,
    /// Two-week earnings forecast.
    Forecast,
    /// Period summaries, charts, and recent activity.
    Dashboard,
    /// Check the records file for anomalies.
    Validate,
    /// Print build metadata.
    Version,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct RangeArgs {
    /// First day of the window (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last day of the window (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    /// Whole-day range from the flags. A lone `--start` runs through today; a lone
    /// `--end` reaches back `default_days`. No flags defers to the API default.
    pub fn resolve(
        &self,
        today: NaiveDate,
        default_days: u32,
    ) -> Result<Option<DateRange>, AppError> {
        let (start, end) = match (self.start, self.end) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, today),
            (None, Some(end)) => (end - Duration::days(i64::from(default_days)), end),
        };
        Ok(Some(DateRange::from_dates(start, end)?))
    }
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    path: PathBuf,
    earnings: usize,
    expenses: usize,
    users: Vec<Uuid>,
    warnings: Vec<String>,
}

/// Runs one command and returns the JSON it produced.
pub fn run(cli: &Cli) -> Result<String, AppError> {
    if let Command::Version = cli.command {
        return render(&build_info::current());
    }

    let manager = match &cli.config_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
        None => ConfigManager::from_env()?,
    };
    let config = manager.load()?;
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.resolve_data_file(manager.base_dir()));
    let source = JsonRecordSource::open(&data_path)?;

    if let Command::Validate = cli.command {
        let document = source.document();
        return render(&ValidationReport {
            path: data_path,
            earnings: document.earnings.len(),
            expenses: document.expenses.len(),
            users: document.users().into_iter().collect(),
            warnings: document.warnings(),
        });
    }

    let user = resolve_user(&source, cli.user)?;
    let clock = clock_for(cli.as_of)?;
    let ctx = ApiContext::new(&source, clock.as_ref(), &config.analytics);
    info!(%user, path = %data_path.display(), "running {:?}", cli.command);

    dispatch(&cli.command, &ctx, &config, user)
}

fn dispatch(
    command: &Command,
    ctx: &ApiContext<'_>,
    config: &Config,
    user: Uuid,
) -> Result<String, AppError> {
    let today = ctx.clock.today_in(config.analytics.offset());
    let days = config.analytics.default_range_days;
    match command {
        Command::Profit(range) => {
            render(&api_profit_report(ctx, user, range.resolve(today, days)?)?)
        }
        Command::Platforms(range) => {
            render(&api_platform_report(ctx, user, range.resolve(today, days)?)?)
        }
        Command::Earnings(range) => {
            render(&api_earnings_report(ctx, user, range.resolve(today, days)?)?)
        }
        Command::Expenses(range) => {
            render(&api_expense_report(ctx, user, range.resolve(today, days)?)?)
        }
        Command::Hours => render(&api_optimal_hours(ctx, user)?),
        Command::Forecast => render(&api_earnings_prediction(ctx, user)?),
        Command::Dashboard => render(&api_dashboard(ctx, user)?),
        Command::Validate | Command::Version => Err(AppError::Usage(format!(
            "{command:?} does not read analytics"
        ))),
    }
}

/// The requested user, or the only user present in the file.
fn resolve_user(source: &JsonRecordSource, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    let users = source.document().users();
    match requested {
        Some(user) if users.contains(&user) => Ok(user),
        Some(user) => Err(CoreError::UserNotFound(user).into()),
        None => {
            let mut candidates = users.into_iter();
            match (candidates.next(), candidates.next()) {
                (Some(only), None) => Ok(only),
                (None, _) => Err(AppError::Usage(format!(
                    "{} holds no records",
                    source.path().display()
                ))),
                (Some(_), Some(_)) => Err(AppError::Usage(
                    "records belong to several users; pass --user".into(),
                )),
            }
        }
    }
}

fn clock_for(as_of: Option<NaiveDate>) -> Result<Box<dyn Clock>, AppError> {
    let Some(date) = as_of else {
        return Ok(Box::new(SystemClock));
    };
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| AppError::Usage(format!("cannot end {date}")))?;
    Ok(Box::new(FixedClock(date.and_time(last_second).and_utc())))
}

fn render<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}
