//! Error types for concierge-tools

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Capability not registered
    #[error("capability not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Client(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
