//! CLI command implementations

pub mod menu;
mod scrape;

pub use scrape::ScrapeArgs;
