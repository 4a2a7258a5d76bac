//! Error types for the session boundary.

use crate::geometry::BoxId;
use thiserror::Error;

/// Errors raised when a host breaks the session's preconditions.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Unknown box (no discovery pass has seen it): {0}")]
    UnknownBox(BoxId),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for session operations.
pub type EngineResult<T> = Result<T, EngineError>;
