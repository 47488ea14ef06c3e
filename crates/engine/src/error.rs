//! Engine error types

use stratus_core::{StackId, StackStatus};
use stratus_template::{ResolveError, TemplateError};
use thiserror::Error;

/// Errors raised by stack lifecycle and registry operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackError {
    /// `DescribeStacks` key matched no active or deleted stack
    #[error("Stack with id {key} does not exist")]
    Validation {
        /// The lookup key as supplied by the caller
        key: String,
    },

    /// Key did not resolve to a stack (or logical id to a resource)
    #[error("not found: {key}")]
    NotFound {
        /// The lookup key as supplied by the caller
        key: String,
    },

    /// The stack's status does not allow the requested transition
    #[error("stack {stack_id} is {status}; cannot {operation}")]
    InvalidState {
        /// Stack that rejected the operation
        stack_id: StackId,
        /// Its status at the time
        status: StackStatus,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Region is not part of the configured region set
    #[error("unknown region: {region}")]
    UnknownRegion {
        /// Requested region
        region: String,
    },

    /// Template text could not be parsed
    #[error(transparent)]
    Parse(#[from] TemplateError),

    /// Resolver rejected the template or parameters
    #[error(transparent)]
    Resolution(#[from] ResolveError),
}

impl StackError {
    /// Check if this is a lookup failure (`Validation` or `NotFound`)
    pub fn is_not_found(&self) -> bool {
        matches!(self, StackError::Validation { .. } | StackError::NotFound { .. })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, StackError>;
