//! Error types for the simulation host.

use boardwalk_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the simulation host.
#[derive(Debug, Error)]
pub enum SimError {
    /// An environment variable is present but invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The game rejected its configuration or a request.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
