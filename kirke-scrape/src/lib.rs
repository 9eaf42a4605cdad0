//! Kirke Scrape - sogn.dk integration for kirkedata
//!
//! This crate fetches the church directory feed and scrapes the per-church
//! "praester-medarb" staff pages. All HTTP is blocking and strictly
//! sequential; the scrape loop paces itself with a fixed delay.

mod client;
mod error;
mod runner;
mod staff;

pub use client::SognClient;
pub use error::{Error, Result};
pub use runner::{scrape_staff, ScrapeSummary};
pub use staff::parse_staff;
