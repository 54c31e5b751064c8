//! Tunable thresholds consumed by the analytics services.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// How the start date of an `(ISO year, week)` pair is resolved.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartPolicy {
    /// The ISO-8601 Monday of the week, which may fall in the previous calendar year.
    #[default]
    Iso,
    /// Reproduces the week-start dates emitted by earlier releases, including
    /// January 1st being returned for week 1 of most years.
    Legacy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Span of the reporting window when the caller supplies no range.
    pub default_range_days: u32,
    pub min_forecast_records: usize,
    pub forecast_window_weeks: usize,
    /// Coefficient of variation strictly below this is classified high confidence.
    pub high_confidence_cov: f64,
    /// Coefficient of variation strictly above this is classified low confidence.
    pub low_confidence_cov: f64,
    pub top_hours: usize,
    /// Session count at which an hourly slot reaches full confidence.
    pub confidence_saturation_sessions: u32,
    pub recent_activity_limit: usize,
    pub week_start_policy: WeekStartPolicy,
    /// Fixed offset used to read wall-clock hours and weekdays off session timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            default_range_days: 30,
            min_forecast_records: 7,
            forecast_window_weeks: 4,
            high_confidence_cov: 0.15,
            low_confidence_cov: 0.30,
            top_hours: 10,
            confidence_saturation_sessions: 5,
            recent_activity_limit: 5,
            week_start_policy: WeekStartPolicy::Iso,
            utc_offset_minutes: 0,
        }
    }
}

impl AnalyticsSettings {
    /// The configured offset, or UTC when the minutes are outside a valid offset.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}
