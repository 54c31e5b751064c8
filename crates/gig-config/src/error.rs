use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Serde(String),

    #[error("No home directory available; set {0}")]
    NoHomeDir(&'static str),
}
