//! Shared traits implemented by the record types.

use chrono::NaiveDate;
use uuid::Uuid;

/// Exposes a stable identifier for stored records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Associates a record with the user who logged it.
pub trait BelongsToUser {
    fn user_id(&self) -> Uuid;
}

/// Supplies the calendar date a record is booked on.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
