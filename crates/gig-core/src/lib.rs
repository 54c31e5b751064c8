//! gig-core
//!
//! Analytics services for gig earnings: summaries, groupings, hourly
//! profitability, and weekly forecasts.
//! Depends on gig-domain. No CLI, no terminal I/O, no file access; records
//! arrive through a [`storage::RecordSource`].

pub mod bucket_service;
pub mod calendar;
pub mod dashboard_service;
pub mod error;
pub mod forecast_service;
pub mod hourly_service;
pub mod public_api;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use bucket_service::*;
pub use calendar::*;
pub use dashboard_service::*;
pub use error::CoreError;
pub use forecast_service::*;
pub use hourly_service::*;
pub use public_api::*;
pub use storage::*;
pub use summary_service::SummaryService;
pub use time::*;
