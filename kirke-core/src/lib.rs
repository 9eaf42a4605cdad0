//! Kirke Core - Core library for the kirkedata church directory tool
//!
//! This crate provides the domain model, the in-memory record store with
//! its merge semantics, the XML feed parser and the account-status
//! reconciler. Network and spreadsheet I/O live in their own crates.

pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod reconcile;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{AccountStatusRow, Church, ChurchRow, StaffEntry};
pub use store::{MergeOutcome, Store};
