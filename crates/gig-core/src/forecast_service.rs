//! Two-week earnings projection from a trailing window of ISO weeks.
//!
//! The next week is predicted as the window's moving average. The week after
//! adds the average week-over-week change once; hours and deliveries stay at
//! their averages for both weeks.

use chrono::Duration;
use gig_domain::{
    AnalyticsSettings, EarningRecord, Forecast, ForecastConfidence, ForecastOutcome,
    InsufficientForecast, InsufficientReason, WeekPrediction, WeeklyAggregate,
};
use tracing::debug;

use crate::{
    bucket_service::BucketService,
    calendar::{date_of_iso_week, iso_week_key},
    summary_service::ratio,
};

pub struct ForecastService;

impl ForecastService {
    pub fn forecast(earnings: &[EarningRecord], settings: &AnalyticsSettings) -> ForecastOutcome {
        if earnings.len() < settings.min_forecast_records {
            return insufficient(
                "Not enough historical data for accurate predictions",
                InsufficientReason::TooFewRecords {
                    found: earnings.len(),
                    required: settings.min_forecast_records,
                },
            );
        }

        let weekly = BucketService::weekly_aggregates(earnings);
        let window = settings.forecast_window_weeks.max(1);
        if weekly.len() < window {
            return insufficient(
                "Not enough weekly data for accurate predictions",
                InsufficientReason::TooFewWeeks {
                    found: weekly.len(),
                    required: window,
                },
            );
        }

        let recent = &weekly[weekly.len() - window..];
        let weekly_earnings: Vec<f64> = recent.iter().map(|week| week.total_earnings).collect();
        let average_earnings = mean(&weekly_earnings);
        let average_hours = mean_of(recent, |week| week.total_hours);
        let average_deliveries = mean_of(recent, |week| week.total_deliveries as f64);

        let variance = population_variance(&weekly_earnings);
        let coefficient_of_variation = ratio(variance.sqrt(), average_earnings);
        let confidence = classify(coefficient_of_variation, settings);
        let trend = mean_step(&weekly_earnings);

        // `recent` holds `window >= 1` weeks.
        let latest = recent[recent.len() - 1];
        let Some(latest_start) =
            date_of_iso_week(latest.week, latest.iso_year, settings.week_start_policy)
        else {
            return insufficient(
                "Most recent week has no resolvable start date",
                InsufficientReason::UnresolvableWeek {
                    iso_year: latest.iso_year,
                    week: latest.week,
                },
            );
        };

        let prediction = |weeks_ahead: i64, total_earnings: f64| {
            let start_date = latest_start + Duration::weeks(weeks_ahead);
            let (iso_year, week) = iso_week_key(start_date);
            WeekPrediction {
                iso_year,
                week,
                start_date,
                total_earnings,
                total_hours: average_hours,
                total_deliveries: average_deliveries,
            }
        };
        let predictions = [
            prediction(1, average_earnings),
            prediction(2, average_earnings + trend),
        ];

        debug!(
            weeks = weekly.len(),
            average_earnings,
            trend,
            coefficient_of_variation,
            ?confidence,
            "computed earnings forecast"
        );

        ForecastOutcome::Ready(Forecast {
            historical_weekly: weekly,
            predictions,
            confidence,
            trend,
            average_earnings,
            average_hours,
            average_deliveries,
            coefficient_of_variation,
        })
    }
}

/// Both bounds are exclusive: a coefficient exactly on a threshold is medium.
pub fn classify(coefficient_of_variation: f64, settings: &AnalyticsSettings) -> ForecastConfidence {
    if coefficient_of_variation < settings.high_confidence_cov {
        ForecastConfidence::High
    } else if coefficient_of_variation > settings.low_confidence_cov {
        ForecastConfidence::Low
    } else {
        ForecastConfidence::Medium
    }
}

/// Variance dividing by N.
pub fn population_variance(values: &[f64]) -> f64 {
    let average = mean(values);
    mean(
        &values
            .iter()
            .map(|value| (value - average).powi(2))
            .collect::<Vec<_>>(),
    )
}

/// Average difference between consecutive values; 0 for fewer than two values.
pub fn mean_step(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let total: f64 = values.windows(2).map(|pair| pair[1] - pair[0]).sum();
    total / (values.len() - 1) as f64
}

fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

fn mean_of(weeks: &[WeeklyAggregate], field: impl Fn(&WeeklyAggregate) -> f64) -> f64 {
    ratio(weeks.iter().map(field).sum(), weeks.len() as f64)
}

fn insufficient(message: &str, reason: InsufficientReason) -> ForecastOutcome {
    debug!(?reason, "forecast skipped");
    ForecastOutcome::InsufficientData(InsufficientForecast {
        message: message.to_string(),
        reason,
        predictions: Vec::new(),
        confidence: ForecastConfidence::Low,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use gig_domain::{Platform, WeekStartPolicy};
    use uuid::Uuid;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn earning(date: NaiveDate, total: f64) -> EarningRecord {
        let start = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        EarningRecord::new(
            Uuid::nil(),
            Platform::GrubHub,
            date,
            start,
            start + Duration::hours(4),
            total,
            0.0,
            0.0,
        )
        .with_deliveries(5)
    }

    /// Two sessions per ISO week starting Monday 2024-01-01, split evenly.
    fn weeks_of(totals: &[f64]) -> Vec<EarningRecord> {
        let first_monday = ymd(2024, 1, 1);
        totals
            .iter()
            .enumerate()
            .flat_map(|(idx, total)| {
                let monday = first_monday + Duration::weeks(idx as i64);
                [
                    earning(monday, total / 2.0),
                    earning(monday + Duration::days(2), total / 2.0),
                ]
            })
            .collect()
    }

    fn ready(outcome: ForecastOutcome) -> Forecast {
        match outcome {
            ForecastOutcome::Ready(forecast) => forecast,
            other => panic!("expected forecast, got {other:?}"),
        }
    }

    #[test]
    fn flat_history_has_no_trend_and_high_confidence() {
        let forecast = ready(ForecastService::forecast(
            &weeks_of(&[100.0, 100.0, 100.0, 100.0]),
            &AnalyticsSettings::default(),
        ));
        assert_eq!(forecast.trend, 0.0);
        assert_eq!(forecast.coefficient_of_variation, 0.0);
        assert_eq!(forecast.confidence, ForecastConfidence::High);
        assert_eq!(forecast.next_week().total_earnings, 100.0);
        assert_eq!(forecast.week_after().total_earnings, 100.0);
    }

    #[test]
    fn rising_history_applies_trend_once_to_week_after() {
        let forecast = ready(ForecastService::forecast(
            &weeks_of(&[100.0, 120.0, 140.0, 160.0]),
            &AnalyticsSettings::default(),
        ));
        assert_eq!(forecast.trend, 20.0);
        assert_eq!(forecast.average_earnings, 130.0);
        assert_eq!(forecast.next_week().total_earnings, 130.0);
        assert_eq!(forecast.week_after().total_earnings, 150.0);
        assert_eq!(forecast.confidence, ForecastConfidence::Medium);
        assert_eq!(forecast.week_after().total_hours, 8.0);
        assert_eq!(forecast.week_after().total_deliveries, 10.0);
    }

    #[test]
    fn predictions_start_one_and_two_weeks_after_latest_week() {
        let forecast = ready(ForecastService::forecast(
            &weeks_of(&[50.0, 60.0, 70.0, 80.0]),
            &AnalyticsSettings::default(),
        ));
        assert_eq!(forecast.next_week().start_date, ymd(2024, 1, 29));
        assert_eq!((forecast.next_week().iso_year, forecast.next_week().week), (2024, 5));
        assert_eq!(forecast.week_after().start_date, ymd(2024, 2, 5));
        assert_eq!(forecast.week_after().week, 6);
    }

    #[test]
    fn legacy_week_start_policy_reproduces_old_dates() {
        let settings = AnalyticsSettings {
            week_start_policy: WeekStartPolicy::Legacy,
            ..AnalyticsSettings::default()
        };
        let forecast = ready(ForecastService::forecast(
            &weeks_of(&[50.0, 60.0, 70.0, 80.0]),
            &settings,
        ));
        // 2024 opens on a Monday, so the legacy anchor for week 4 is Sunday the 28th.
        assert_eq!(forecast.next_week().start_date, ymd(2024, 2, 4));
        assert_eq!(forecast.week_after().start_date, ymd(2024, 2, 11));
    }

    #[test]
    fn only_the_trailing_window_drives_the_projection() {
        let forecast = ready(ForecastService::forecast(
            &weeks_of(&[900.0, 5.0, 100.0, 100.0, 100.0, 100.0]),
            &AnalyticsSettings::default(),
        ));
        assert_eq!(forecast.historical_weekly.len(), 6);
        assert_eq!(forecast.average_earnings, 100.0);
        assert_eq!(forecast.confidence, ForecastConfidence::High);
    }

    #[test]
    fn three_weeks_is_insufficient() {
        let earnings = weeks_of(&[100.0, 100.0, 100.0])
            .into_iter()
            .chain([earning(ymd(2024, 1, 3), 10.0)])
            .collect::<Vec<_>>();
        assert!(earnings.len() >= 7);
        let outcome = ForecastService::forecast(&earnings, &AnalyticsSettings::default());
        match &outcome {
            ForecastOutcome::InsufficientData(data) => {
                assert_eq!(
                    data.reason,
                    InsufficientReason::TooFewWeeks {
                        found: 3,
                        required: 4
                    }
                );
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
        assert!(outcome.predictions().is_empty());
        assert_eq!(outcome.confidence(), ForecastConfidence::Low);
    }

    #[test]
    fn too_few_records_is_insufficient() {
        let earnings = weeks_of(&[100.0, 100.0, 100.0]);
        let outcome = ForecastService::forecast(&earnings, &AnalyticsSettings::default());
        assert!(!outcome.is_ready());
        assert!(matches!(
            outcome,
            ForecastOutcome::InsufficientData(InsufficientForecast {
                reason: InsufficientReason::TooFewRecords { found: 6, required: 7 },
                ..
            })
        ));
    }

    #[test]
    fn confidence_thresholds_are_exclusive() {
        let settings = AnalyticsSettings::default();
        assert_eq!(classify(0.1499, &settings), ForecastConfidence::High);
        assert_eq!(classify(0.15, &settings), ForecastConfidence::Medium);
        assert_eq!(classify(0.3, &settings), ForecastConfidence::Medium);
        assert_eq!(classify(0.3001, &settings), ForecastConfidence::Low);
    }

    #[test]
    fn statistics_helpers() {
        assert_eq!(population_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 4.0);
        assert_eq!(mean_step(&[100.0, 120.0, 140.0, 160.0]), 20.0);
        assert_eq!(mean_step(&[42.0]), 0.0);
    }
}
