//! gig-domain
//!
//! Pure domain models for delivery work sessions, expenses, and the report
//! structures derived from them. No I/O, no storage, no CLI.

pub mod common;
pub mod error;
pub mod range;
pub mod record;
pub mod report;
pub mod settings;

pub use common::*;
pub use error::RangeError;
pub use range::DateRange;
pub use record::*;
pub use report::*;
pub use settings::*;
