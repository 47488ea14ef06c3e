//! Unified error types for Stratus.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use stratus_engine::{ConfigError, StackError};
use thiserror::Error;

/// All Stratus errors.
///
/// This is the canonical error type for all facade operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Describe key matched no active or deleted stack
    #[error("Stack with id {key} does not exist")]
    Validation {
        /// Key as supplied by the caller
        key: String,
    },

    /// Stack, resource or region not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Stack status does not allow the operation
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Template text is neither JSON nor YAML, or not a mapping
    #[error("template error: {0}")]
    Parse(String),

    /// Resolver rejected the template or parameters
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for Stratus operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Validation { .. })
    }

    /// Check if this is the describe-time validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if the template or resolver rejected the request.
    pub fn is_template_rejection(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::Resolution(_))
    }
}

impl From<StackError> for Error {
    fn from(e: StackError) -> Self {
        match e {
            StackError::Validation { key } => Error::Validation { key },
            StackError::NotFound { key } => Error::NotFound(key),
            StackError::UnknownRegion { region } => Error::NotFound(format!("region {}", region)),
            e @ StackError::InvalidState { .. } => Error::InvalidState(e.to_string()),
            StackError::Parse(e) => Error::Parse(e.to_string()),
            StackError::Resolution(e) => Error::Resolution(e.to_string()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
