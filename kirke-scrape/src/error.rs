//! Error types for scraping operations

use thiserror::Error;

/// Result type for scraping operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to sogn.dk
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// A church record carries an unusable source URL
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// A CSS selector failed to compile
    #[error("Invalid selector: {0}")]
    Selector(String),
}
