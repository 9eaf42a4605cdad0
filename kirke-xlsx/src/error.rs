//! Error types for spreadsheet operations

use thiserror::Error;

/// Result type for spreadsheet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing workbooks
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook read error
    #[error("Spreadsheet read error: {0}")]
    Read(#[from] calamine::Error),

    /// Workbook write error
    #[error("Spreadsheet write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook has no sheet to read
    #[error("Workbook has no readable sheet")]
    NoSheet,

    /// A required column is missing from the header row
    #[error("Missing required column {0:?}")]
    MissingColumn(String),

    /// A cell could not be converted to the expected type
    #[error("Row {row}, column {column:?}: {message}")]
    InvalidCell {
        row: usize,
        column: String,
        message: String,
    },
}
