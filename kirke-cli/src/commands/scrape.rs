//! Scrape command - one-shot feed fetch and export

use std::path::PathBuf;

use clap::Args;
use kirke_core::{feed, Config, Store};
use kirke_scrape::SognClient;

/// Arguments for the scrape command
#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Also scrape the staff page of every church
    #[arg(long)]
    pub staff: bool,

    /// Output workbook path (defaults to the configured backup path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl ScrapeArgs {
    /// Execute the scrape command
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let out = self
            .out
            .clone()
            .unwrap_or_else(|| config.export.backup_path.clone());

        if verbose {
            tracing::info!(
                feed_url = %config.feed.url,
                staff = self.staff,
                out = %out.display(),
                "Starting one-shot scrape"
            );
        }

        let client = SognClient::new(&config.feed.url)?;

        println!("Fetching church directory from {}", config.feed.url);
        let xml = client.fetch_feed()?;
        let records = feed::parse_feed(&xml)?;

        let mut store = Store::new();
        store.ingest_feed(records);
        println!("{} churches found.", store.len());

        if self.staff {
            println!("Scraping staff pages...");
            let summary = kirke_scrape::scrape_staff(&client, &mut store, config.scrape.delay);
            println!(
                "Staff scrape finished: {} scraped, {} failed.",
                summary.scraped, summary.failed
            );
        }

        kirke_xlsx::write_workbook(&out, &store)?;
        println!("Data saved to {}", out.display());

        Ok(())
    }
}
