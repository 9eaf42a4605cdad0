//! Interactive menu driver
//!
//! The menu loop is the outermost recovery boundary: every branch failure
//! is logged and control returns to the menu. Only an unusable stdin ends
//! the loop abnormally.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::bail;
use tracing::{error, info, warn};

use kirke_core::{feed, reconcile, Config, MergeOutcome, Store};
use kirke_scrape::SognClient;

/// One menu-branch selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Import,
    Scrape,
    Reconcile,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Import),
            "2" => Some(Self::Scrape),
            "3" => Some(Self::Reconcile),
            "E" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Strict `Y`/`n` answers, anything else re-prompts
fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim() {
        "Y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

fn prompt(text: &str) -> anyhow::Result<String> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_yes_no(text: &str) -> anyhow::Result<bool> {
    loop {
        match parse_yes_no(&prompt(text)?) {
            Some(answer) => return Ok(answer),
            None => warn!("Invalid choice. Please try again."),
        }
    }
}

/// Resolve a workbook path from a CLI override or a prompt.
///
/// Returns `None` (back to the menu) for a blank answer or a missing file,
/// matching the original workflow's "try again" behavior.
fn resolve_path(cli_override: Option<&Path>, text: &str) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = cli_override {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        warn!(path = %path.display(), "File not found. Please try again or check this path exists");
        return Ok(None);
    }

    let answer = prompt(text)?;
    if answer.is_empty() {
        warn!("No file selected. Please try again.");
        return Ok(None);
    }

    let path = PathBuf::from(answer);
    if !path.is_file() {
        warn!(path = %path.display(), "File not found. Please try again.");
        return Ok(None);
    }

    Ok(Some(path))
}

/// Run the interactive menu loop until the operator exits
pub fn run(config: &Config, arg1: Option<&Path>, arg2: Option<&Path>) -> anyhow::Result<()> {
    let mut store = Store::new();

    loop {
        println!();
        println!("Press 1 to import existing data from an Excel file.");
        println!("Press 2 to scrape new data from the web.");
        println!("Press 3 to import 'Account Status' field from an Excel file.");
        println!("Press E to exit.");

        match MenuChoice::parse(&prompt("Enter your choice: ")?) {
            None => warn!("Invalid choice. Please try again."),
            Some(MenuChoice::Import) => import_branch(&mut store, arg1)?,
            Some(MenuChoice::Scrape) => scrape_branch(config, &mut store)?,
            Some(MenuChoice::Reconcile) => reconcile_branch(&mut store, arg2)?,
            Some(MenuChoice::Exit) => {
                save_prompt(&store)?;
                return Ok(());
            }
        }
    }
}

/// Menu item 1: merge a previously exported dataset workbook into the store
fn import_branch(store: &mut Store, arg1: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = resolve_path(arg1, "Dataset workbook path: ")? else {
        return Ok(());
    };

    let rows = match kirke_xlsx::read_dataset(&path) {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "An error occurred while loading the data. Please try again.");
            return Ok(());
        }
    };

    for row in rows {
        let church_id = row.church_id;
        match store.merge_row(row) {
            MergeOutcome::Updated => info!(kirke_id = church_id, "Updated existing church"),
            MergeOutcome::Added => info!(kirke_id = church_id, "Added new church"),
        }
    }

    Ok(())
}

/// Menu item 2: fetch the feed, then optionally scrape staff pages
fn scrape_branch(config: &Config, store: &mut Store) -> anyhow::Result<()> {
    let client = match SognClient::new(&config.feed.url) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Could not create HTTP client");
            return Ok(());
        }
    };

    let xml = match client.fetch_feed() {
        Ok(xml) => xml,
        Err(e) => {
            error!(error = %e, "Unable to retrieve data from the web. Please try again.");
            return Ok(());
        }
    };

    // Parse fully before touching the store; a malformed feed leaves it as is
    let records = match feed::parse_feed(&xml) {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Unable to parse the feed. Please try again.");
            return Ok(());
        }
    };

    store.ingest_feed(records);
    println!("{} churches found.", store.len());

    if prompt_yes_no("Do you want to scrape information about priests for each church? (Y/n) ")? {
        let summary = kirke_scrape::scrape_staff(&client, store, config.scrape.delay);
        println!(
            "Staff scrape finished: {} scraped, {} failed.",
            summary.scraped, summary.failed
        );

        match kirke_xlsx::write_backup(&config.export.backup_path, store) {
            Ok(()) => println!(
                "Kirker list backed up to {}.",
                config.export.backup_path.display()
            ),
            Err(e) => error!(error = %e, "Could not write backup workbook"),
        }
    }

    Ok(())
}

/// Menu item 3: merge the account-status workbook, then offer to save
fn reconcile_branch(store: &mut Store, arg2: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = resolve_path(arg2, "Account-status workbook path: ")? else {
        return Ok(());
    };

    let rows = match kirke_xlsx::read_account_status(&path) {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Error reading Excel file");
            return Ok(());
        }
    };

    let assigned = reconcile::apply_account_status(store.churches_mut(), &rows);
    println!("{} account-status assignments made.", assigned);

    save_prompt(store)
}

/// Offer to export the store; `n` or a blank path skips without failing
fn save_prompt(store: &Store) -> anyhow::Result<()> {
    if !prompt_yes_no("Do you want to save the data to an Excel file? (Y/n) ")? {
        info!("Data not saved.");
        return Ok(());
    }

    let answer = prompt("Output workbook path: ")?;
    if answer.is_empty() {
        warn!("No file selected. Data not saved.");
        return Ok(());
    }

    match kirke_xlsx::write_workbook(Path::new(&answer), store) {
        Ok(()) => println!("Data saved to {}", answer),
        Err(e) => error!(error = %e, "Could not save the data"),
    }

    Ok(())
}
