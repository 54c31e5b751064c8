//! Groups flat record lists into keyed totals for charts and comparisons.
//!
//! Every grouping runs in two passes: records are folded into per-key
//! accumulators first, and derived fields (profit, ratios) are computed only
//! once accumulation has finished.

use std::{collections::HashMap, hash::Hash};

use chrono::{Datelike, NaiveDate};
use gig_domain::{
    Amounted, CategoryTotal, DailyAmount, DailyProfit, Dated, EarningRecord, ExpenseCategory,
    ExpenseRecord, MonthlySeries, Platform, PlatformPerformance, PlatformTotal, WeeklyAggregate,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{calendar::iso_week_key, summary_service::EarningTotals};

/// `(ISO year, ISO week)` bucket key; orders chronologically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl IsoWeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let (iso_year, week) = iso_week_key(date);
        Self { iso_year, week }
    }
}

/// Per-key accumulators kept in the order keys were first seen.
#[derive(Debug, Clone)]
pub struct Buckets<K, A> {
    index: HashMap<K, usize>,
    entries: Vec<(K, A)>,
}

impl<K, A> Default for Buckets<K, A> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, A> Buckets<K, A>
where
    K: Eq + Hash + Copy,
    A: Default,
{
    pub fn fold<'r, T: 'r>(
        records: impl IntoIterator<Item = &'r T>,
        key: impl Fn(&T) -> K,
        mut accumulate: impl FnMut(&mut A, &T),
    ) -> Self {
        let mut buckets = Self::default();
        for record in records {
            accumulate(buckets.entry(key(record)), record);
        }
        buckets
    }

    pub fn entry(&mut self, key: K) -> &mut A {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key, A::default()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn into_entries(self) -> Vec<(K, A)> {
        self.entries
    }

    /// Entries in ascending key order.
    pub fn into_sorted(self) -> Vec<(K, A)>
    where
        K: Ord,
    {
        let mut entries = self.entries;
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ProfitTotals {
    earnings: f64,
    expenses: f64,
}

pub struct BucketService;

impl BucketService {
    /// Sums amounts per record date, ascending by date.
    pub fn daily_totals<T: Dated + Amounted>(records: &[T]) -> Vec<DailyAmount> {
        Buckets::<_, f64>::fold(records, |record| record.date(), |sum, record| {
            *sum += record.amount()
        })
        .into_sorted()
        .into_iter()
        .map(|(date, amount)| DailyAmount { date, amount })
        .collect()
    }

    pub fn earnings_by_date(earnings: &[EarningRecord]) -> Vec<DailyAmount> {
        Self::daily_totals(earnings)
    }

    pub fn expenses_by_date(expenses: &[ExpenseRecord]) -> Vec<DailyAmount> {
        Self::daily_totals(expenses)
    }

    /// Earnings, expenses, and profit per date, ascending by date.
    pub fn profit_by_date(
        earnings: &[EarningRecord],
        expenses: &[ExpenseRecord],
    ) -> Vec<DailyProfit> {
        let mut buckets: Buckets<_, ProfitTotals> = Buckets::default();
        for earning in earnings {
            buckets.entry(earning.date).earnings += earning.total_earning;
        }
        for expense in expenses {
            buckets.entry(expense.date).expenses += expense.amount;
        }

        buckets
            .into_sorted()
            .into_iter()
            .map(|(date, totals)| DailyProfit {
                date,
                earnings: totals.earnings,
                expenses: totals.expenses,
                profit: totals.earnings - totals.expenses,
            })
            .collect()
    }

    /// Per-platform totals and ratios, highest earning platform first.
    ///
    /// Platforms with equal earnings keep the order they first appear in `earnings`.
    pub fn platform_performance(earnings: &[EarningRecord]) -> Vec<PlatformPerformance> {
        let buckets = Buckets::<Platform, EarningTotals>::fold(
            earnings,
            |record| record.platform,
            |totals, record| totals.add(record),
        );
        debug!(platforms = buckets.len(), "grouped earnings by platform");

        let mut performance: Vec<PlatformPerformance> = buckets
            .into_entries()
            .into_iter()
            .map(|(platform, totals)| PlatformPerformance {
                platform,
                total_earnings: totals.earnings,
                total_deliveries: totals.deliveries,
                total_hours: totals.hours,
                total_miles: totals.miles,
                earnings_per_hour: totals.earnings_per_hour(),
                earnings_per_delivery: totals.earnings_per_delivery(),
                earnings_per_mile: totals.earnings_per_mile(),
                deliveries_per_hour: totals.deliveries_per_hour(),
            })
            .collect();
        performance.sort_by(|a, b| b.total_earnings.total_cmp(&a.total_earnings));
        performance
    }

    pub fn earnings_by_platform(earnings: &[EarningRecord]) -> Vec<PlatformTotal> {
        let mut totals: Vec<PlatformTotal> =
            Buckets::<Platform, f64>::fold(earnings, |record| record.platform, |sum, record| {
                *sum += record.total_earning
            })
            .into_entries()
            .into_iter()
            .map(|(platform, total)| PlatformTotal { platform, total })
            .collect();
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }

    pub fn expenses_by_category(expenses: &[ExpenseRecord]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Buckets::<ExpenseCategory, f64>::fold(
            expenses,
            |record| record.category,
            |sum, record| *sum += record.amount,
        )
        .into_entries()
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }

    /// Twelve calendar-month slots; months without records stay at zero.
    ///
    /// Records are bucketed by month only, so callers pass a single year's records.
    pub fn monthly_totals<T: Dated + Amounted>(records: &[T]) -> MonthlySeries {
        records.iter().fold([0.0; 12], |mut months, record| {
            months[record.date().month0() as usize] += record.amount();
            months
        })
    }

    /// Weekly totals keyed by ISO week, oldest week first.
    pub fn weekly_aggregates(earnings: &[EarningRecord]) -> Vec<WeeklyAggregate> {
        Buckets::<IsoWeekKey, EarningTotals>::fold(
            earnings,
            |record| IsoWeekKey::of(record.date),
            |totals, record| totals.add(record),
        )
        .into_sorted()
        .into_iter()
        .map(|(key, totals)| WeeklyAggregate {
            iso_year: key.iso_year,
            week: key.week,
            total_earnings: totals.earnings,
            total_hours: totals.hours,
            total_deliveries: totals.deliveries,
        })
        .collect()
    }
}
