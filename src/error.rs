//! Error types for cadence detection

use thiserror::Error;

/// Errors that can occur while detecting lapsed contributors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for detector operations
pub type Result<T> = std::result::Result<T, DetectError>;
