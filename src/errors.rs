use gig_config::ConfigError;
use gig_core::CoreError;
use gig_domain::RangeError;
use thiserror::Error;

/// Failures surfaced to the command line.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}
