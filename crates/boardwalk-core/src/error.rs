//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A caller passed an argument outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An externally supplied resource or setting is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
}
