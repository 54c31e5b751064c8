//! Earning sessions and expenses as supplied by the storage layer.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Delivery platforms a session can be logged against.
pub enum Platform {
    UberEats,
    DoorDash,
    GrubHub,
    Postmates,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::UberEats,
        Platform::DoorDash,
        Platform::GrubHub,
        Platform::Postmates,
        Platform::Other,
    ];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Platform::UberEats => "UberEats",
            Platform::DoorDash => "DoorDash",
            Platform::GrubHub => "GrubHub",
            Platform::Postmates => "Postmates",
            Platform::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Fuel,
    Maintenance,
    Insurance,
    #[serde(rename = "Vehicle Payment")]
    VehiclePayment,
    #[serde(rename = "Phone Bill")]
    PhoneBill,
    Subscriptions,
    Parking,
    Tolls,
    Food,
    Equipment,
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Fuel => "Fuel",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::VehiclePayment => "Vehicle Payment",
            ExpenseCategory::PhoneBill => "Phone Bill",
            ExpenseCategory::Subscriptions => "Subscriptions",
            ExpenseCategory::Parking => "Parking",
            ExpenseCategory::Tolls => "Tolls",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Credit Card")]
    #[default]
    CreditCard,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
    Other,
}

/// A single logged work session on one platform.
///
/// `total_earning` is trusted as supplied; [`EarningRecord::new`] keeps it equal to
/// `base_earning + tips + bonuses`, deserialized records are taken as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarningRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub base_earning: f64,
    #[serde(default)]
    pub tips: f64,
    #[serde(default)]
    pub bonuses: f64,
    pub total_earning: f64,
    #[serde(default = "EarningRecord::default_delivery_count")]
    pub delivery_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles_driven: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EarningRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        platform: Platform,
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        base_earning: f64,
        tips: f64,
        bonuses: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            platform,
            date,
            start_time,
            end_time,
            base_earning,
            tips,
            bonuses,
            total_earning: base_earning + tips + bonuses,
            delivery_count: Self::default_delivery_count(),
            hours_worked: None,
            miles_driven: None,
            notes: None,
        }
    }

    pub fn default_delivery_count() -> u32 {
        1
    }

    pub fn with_deliveries(mut self, count: u32) -> Self {
        self.delivery_count = count;
        self
    }

    pub fn with_miles(mut self, miles: f64) -> Self {
        self.miles_driven = Some(miles);
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours_worked = Some(hours);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Session length in hours as recorded by the start and end timestamps.
    pub fn span_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    /// Hours worked, falling back to the session span when none were supplied.
    pub fn hours(&self) -> f64 {
        self.hours_worked.unwrap_or_else(|| self.span_hours())
    }

    pub fn miles(&self) -> f64 {
        self.miles_driven.unwrap_or(0.0)
    }

    pub fn component_total(&self) -> f64 {
        self.base_earning + self.tips + self.bonuses
    }
}

impl Identifiable for EarningRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToUser for EarningRecord {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Dated for EarningRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amounted for EarningRecord {
    fn amount(&self) -> f64 {
        self.total_earning
    }
}

impl Displayable for EarningRecord {
    fn display_label(&self) -> String {
        format!("{} {} ${:.2}", self.date, self.platform, self.total_earning)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(default = "ExpenseRecord::default_tax_deductible")]
    pub tax_deductible: bool,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseRecord {
    pub fn new(user_id: Uuid, date: NaiveDate, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            category,
            amount,
            tax_deductible: Self::default_tax_deductible(),
            payment_method: PaymentMethod::default(),
            description: None,
        }
    }

    pub fn default_tax_deductible() -> bool {
        true
    }

    pub fn with_tax_deductible(mut self, deductible: bool) -> Self {
        self.tax_deductible = deductible;
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToUser for ExpenseRecord {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!("{} {} ${:.2}", self.date, self.category, self.amount)
    }
}
