use std::collections::HashSet;

use gig_domain::{
    BelongsToUser, DateRange, Dated, Displayable, EarningRecord, ExpenseRecord, Identifiable,
};
use uuid::Uuid;

use crate::CoreError;

const TOTAL_TOLERANCE: f64 = 0.005;

/// Supplies one user's records, optionally limited to a date range.
///
/// `range = None` yields the full history. Implementations return records whose
/// date falls inside the inclusive range; the services never re-filter.
pub trait RecordSource: Send + Sync {
    fn earnings(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<EarningRecord>, CoreError>;
    fn expenses(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<ExpenseRecord>, CoreError>;
}

/// Keeps records for `user` dated inside `range`.
pub fn scoped<T>(records: &[T], user: Uuid, range: Option<&DateRange>) -> Vec<T>
where
    T: BelongsToUser + Dated + Clone,
{
    records
        .iter()
        .filter(|record| record.user_id() == user)
        .filter(|record| range.map_or(true, |range| range.contains_date(record.date())))
        .cloned()
        .collect()
}

/// Record source held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    earnings: Vec<EarningRecord>,
    expenses: Vec<ExpenseRecord>,
}

impl InMemoryRecordSource {
    pub fn new(earnings: Vec<EarningRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self { earnings, expenses }
    }

    pub fn push_earning(&mut self, record: EarningRecord) {
        self.earnings.push(record);
    }

    pub fn push_expense(&mut self, record: ExpenseRecord) {
        self.expenses.push(record);
    }
}

impl RecordSource for InMemoryRecordSource {
    fn earnings(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<EarningRecord>, CoreError> {
        Ok(scoped(&self.earnings, user, range))
    }

    fn expenses(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<ExpenseRecord>, CoreError> {
        Ok(scoped(&self.expenses, user, range))
    }
}

/// Detects records that break the input contract the services rely on.
pub fn record_warnings(earnings: &[EarningRecord], expenses: &[ExpenseRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for record in earnings {
        let label = describe("earning", record);
        if !seen.insert(record.id()) {
            warnings.push(format!("{label} appears more than once"));
        }
        if record.end_time < record.start_time {
            warnings.push(format!(
                "{label} ends at {} before it starts at {}",
                record.end_time, record.start_time
            ));
        }
        if (record.total_earning - record.component_total()).abs() > TOTAL_TOLERANCE {
            warnings.push(format!(
                "{label} total differs from base + tips + bonuses {:.2}",
                record.component_total()
            ));
        }
        if record.delivery_count == 0 {
            warnings.push(format!("{label} has no deliveries"));
        }
        if record.hours() <= 0.0 {
            warnings.push(format!("{label} has no hours worked"));
        }
        if record.miles_driven.is_some_and(|miles| miles < 0.0) {
            warnings.push(format!("{label} has negative miles"));
        }
    }

    for record in expenses {
        let label = describe("expense", record);
        if !seen.insert(record.id()) {
            warnings.push(format!("{label} appears more than once"));
        }
        if record.amount < 0.0 {
            warnings.push(format!("{label} has negative amount"));
        }
    }
    warnings
}

fn describe<T: Identifiable + Displayable>(kind: &str, record: &T) -> String {
    format!("{kind} {} ({})", record.id(), record.display_label())
}
