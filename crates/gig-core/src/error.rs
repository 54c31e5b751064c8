use gig_domain::RangeError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("User not found: {0}")]
    UserNotFound(Uuid),
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] RangeError),
    #[error("Validation failed: {0}")]
    Validation(String),
}
