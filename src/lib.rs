#![doc(test(attr(deny(warnings))))]

//! Gig Insights turns logged delivery sessions and expenses into profit
//! reports, hourly profitability rankings, and short-range earnings forecasts.

pub mod cli;
pub mod errors;
pub mod utils;

pub use gig_core as analytics;
pub use gig_config as config;
pub use gig_domain as domain;
pub use gig_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Gig Insights tracing initialized.");
    });
}
