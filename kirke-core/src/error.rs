//! Error types for kirkedata

use thiserror::Error;

/// Result type alias for kirkedata core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for kirkedata core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The feed document could not be parsed into church records
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
