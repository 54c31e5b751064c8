//! Output structures produced by the analytics services.
//!
//! Every type here is a plain value ready for serialization: dates render as
//! ISO-8601 strings and all measures are `f64` unless they count whole things.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    range::DateRange,
    record::{EarningRecord, ExpenseCategory, ExpenseRecord, Platform},
};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Totals and per-unit ratios over a set of earnings and expenses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Summary {
    pub total_earnings: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percent of earnings kept after expenses; 0 when there were no earnings.
    pub profit_margin: f64,
    pub total_hours: f64,
    pub total_deliveries: u64,
    pub total_miles: f64,
    pub earnings_per_hour: f64,
    pub earnings_per_delivery: f64,
    pub earnings_per_mile: f64,
    pub deliveries_per_hour: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ExpenseSummary {
    pub total_expenses: f64,
    pub total_tax_deductible: f64,
    pub percent_tax_deductible: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyProfit {
    pub date: NaiveDate,
    pub earnings: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlatformPerformance {
    pub platform: Platform,
    pub total_earnings: f64,
    pub total_deliveries: u64,
    pub total_hours: f64,
    pub total_miles: f64,
    pub earnings_per_hour: f64,
    pub earnings_per_delivery: f64,
    pub earnings_per_mile: f64,
    pub deliveries_per_hour: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlatformTotal {
    pub platform: Platform,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Calendar-month totals, January at index 0.
pub type MonthlySeries = [f64; 12];

/// Earnings folded into one ISO week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklyAggregate {
    pub iso_year: i32,
    pub week: u32,
    pub total_earnings: f64,
    pub total_hours: f64,
    pub total_deliveries: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HourCell {
    /// Sum of the per-session earnings rates attributed to this slot.
    pub total_rate: f64,
    pub count: u32,
    pub avg_earnings_per_hour: f64,
}

/// Seven weekdays (Sunday first) by 24 hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HourlyGrid {
    pub cells: [[HourCell; 24]; 7],
}

impl HourlyGrid {
    /// `weekday` counts from Sunday = 0; out-of-range slots yield `None`.
    pub fn cell(&self, weekday: usize, hour: usize) -> Option<&HourCell> {
        self.cells.get(weekday).and_then(|row| row.get(hour))
    }

    pub fn cell_for(&self, weekday: Weekday, hour: usize) -> Option<&HourCell> {
        self.cell(weekday.num_days_from_sunday() as usize, hour)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimalHour {
    pub day: String,
    pub hour: String,
    pub weekday_index: u8,
    pub hour_index: u8,
    pub avg_earnings_per_hour: f64,
    pub sessions: u32,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HourlyRanking {
    Ranked {
        optimal_hours: Vec<OptimalHour>,
        grid: HourlyGrid,
    },
    /// No sessions to rank; the list is empty and every grid cell is zero.
    InsufficientData {
        message: String,
        optimal_hours: Vec<OptimalHour>,
        grid: HourlyGrid,
    },
}

impl HourlyRanking {
    pub fn optimal_hours(&self) -> &[OptimalHour] {
        match self {
            HourlyRanking::Ranked { optimal_hours, .. }
            | HourlyRanking::InsufficientData { optimal_hours, .. } => optimal_hours,
        }
    }

    pub fn grid(&self) -> &HourlyGrid {
        match self {
            HourlyRanking::Ranked { grid, .. }
            | HourlyRanking::InsufficientData { grid, .. } => grid,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ForecastConfidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeekPrediction {
    pub iso_year: i32,
    pub week: u32,
    pub start_date: NaiveDate,
    pub total_earnings: f64,
    pub total_hours: f64,
    pub total_deliveries: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub historical_weekly: Vec<WeeklyAggregate>,
    /// Next week followed by the week after.
    pub predictions: [WeekPrediction; 2],
    pub confidence: ForecastConfidence,
    pub trend: f64,
    pub average_earnings: f64,
    pub average_hours: f64,
    pub average_deliveries: f64,
    pub coefficient_of_variation: f64,
}

impl Forecast {
    pub fn next_week(&self) -> &WeekPrediction {
        &self.predictions[0]
    }

    pub fn week_after(&self) -> &WeekPrediction {
        &self.predictions[1]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsufficientReason {
    TooFewRecords { found: usize, required: usize },
    TooFewWeeks { found: usize, required: usize },
    UnresolvableWeek { iso_year: i32, week: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsufficientForecast {
    pub message: String,
    pub reason: InsufficientReason,
    pub predictions: Vec<WeekPrediction>,
    pub confidence: ForecastConfidence,
}

/// Either a forecast or an explicit signal that history is too thin to produce one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Ready(Forecast),
    InsufficientData(InsufficientForecast),
}

impl ForecastOutcome {
    pub fn predictions(&self) -> &[WeekPrediction] {
        match self {
            ForecastOutcome::Ready(forecast) => &forecast.predictions,
            ForecastOutcome::InsufficientData(insufficient) => &insufficient.predictions,
        }
    }

    pub fn confidence(&self) -> ForecastConfidence {
        match self {
            ForecastOutcome::Ready(forecast) => forecast.confidence,
            ForecastOutcome::InsufficientData(insufficient) => insufficient.confidence,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ForecastOutcome::Ready(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitReport {
    pub summary: Summary,
    pub profit_by_date: Vec<DailyProfit>,
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformReport {
    pub platforms: Vec<PlatformPerformance>,
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsReport {
    pub summary: Summary,
    pub earnings_by_platform: Vec<PlatformTotal>,
    pub earnings_by_date: Vec<DailyAmount>,
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub summary: ExpenseSummary,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub expenses_by_date: Vec<DailyAmount>,
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaries {
    pub today: Summary,
    pub week: Summary,
    pub month: Summary,
    pub year: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub summaries: PeriodSummaries,
    pub platform_performance: Vec<PlatformPerformance>,
    pub daily_earnings: Vec<DailyAmount>,
    pub monthly_earnings: MonthlySeries,
    pub monthly_expenses: MonthlySeries,
    pub recent_earnings: Vec<EarningRecord>,
    pub recent_expenses: Vec<ExpenseRecord>,
}
