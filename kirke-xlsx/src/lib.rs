//! Kirke Xlsx - Spreadsheet import and export for kirkedata
//!
//! Reads dataset and account-status workbooks with calamine and writes the
//! export workbook with rust_xlsxwriter. Column names at this boundary are
//! the Danish ones the surrounding workflow has always used.

mod error;
mod export;
mod import;

pub use error::{Error, Result};
pub use export::{write_backup, write_workbook};
pub use import::{read_account_status, read_dataset};
