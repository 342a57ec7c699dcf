//! Error types for concierge-knowledge

use std::path::PathBuf;
use thiserror::Error;

/// Error type for corpus loading
#[derive(Error, Debug)]
pub enum Error {
    /// Guide file does not exist
    #[error("guide not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other load failure (unreadable, not UTF-8, empty)
    #[error("failed to load guide {}: {message}", path.display())]
    Load {
        /// Path that failed to load
        path: PathBuf,
        /// Detailed message
        message: String,
    },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, Error>;
