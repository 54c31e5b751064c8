//! Totals and zero-guarded ratios over earnings and expenses.

use gig_domain::{EarningRecord, ExpenseRecord, ExpenseSummary, Summary};

/// `numerator / denominator`, or 0 when the denominator is zero.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Running totals folded from earning records before any ratio is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct EarningTotals {
    pub earnings: f64,
    pub hours: f64,
    pub deliveries: u64,
    pub miles: f64,
}

impl EarningTotals {
    pub fn add(&mut self, record: &EarningRecord) {
        self.earnings += record.total_earning;
        self.hours += record.hours();
        self.deliveries += u64::from(record.delivery_count);
        self.miles += record.miles();
    }

    pub fn earnings_per_hour(&self) -> f64 {
        ratio(self.earnings, self.hours)
    }

    pub fn earnings_per_delivery(&self) -> f64 {
        ratio(self.earnings, self.deliveries as f64)
    }

    pub fn earnings_per_mile(&self) -> f64 {
        ratio(self.earnings, self.miles)
    }

    pub fn deliveries_per_hour(&self) -> f64 {
        ratio(self.deliveries as f64, self.hours)
    }
}

impl<'a> FromIterator<&'a EarningRecord> for EarningTotals {
    fn from_iter<I: IntoIterator<Item = &'a EarningRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut totals, record| {
            totals.add(record);
            totals
        })
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Folds earnings and expenses already scoped to one window into totals and ratios.
    pub fn summarize(earnings: &[EarningRecord], expenses: &[ExpenseRecord]) -> Summary {
        let totals: EarningTotals = earnings.iter().collect();
        let total_expenses: f64 = expenses.iter().map(|expense| expense.amount).sum();
        let net_profit = totals.earnings - total_expenses;

        Summary {
            total_earnings: totals.earnings,
            total_expenses,
            net_profit,
            profit_margin: ratio(net_profit, totals.earnings) * 100.0,
            total_hours: totals.hours,
            total_deliveries: totals.deliveries,
            total_miles: totals.miles,
            earnings_per_hour: totals.earnings_per_hour(),
            earnings_per_delivery: totals.earnings_per_delivery(),
            earnings_per_mile: totals.earnings_per_mile(),
            deliveries_per_hour: totals.deliveries_per_hour(),
        }
    }

    pub fn summarize_expenses(expenses: &[ExpenseRecord]) -> ExpenseSummary {
        let (total_expenses, total_tax_deductible) =
            expenses
                .iter()
                .fold((0.0, 0.0), |(total, deductible), expense| {
                    let deductible = if expense.tax_deductible {
                        deductible + expense.amount
                    } else {
                        deductible
                    };
                    (total + expense.amount, deductible)
                });

        ExpenseSummary {
            total_expenses,
            total_tax_deductible,
            percent_tax_deductible: ratio(total_tax_deductible, total_expenses) * 100.0,
        }
    }
}
