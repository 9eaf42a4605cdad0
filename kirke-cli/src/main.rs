//! Kirke CLI - Command line interface for kirkedata
//!
//! Maintains a directory of Danish churches: fetches the sogn.dk feed,
//! scrapes staff pages, merges account-status spreadsheets and exports the
//! lot to a workbook. Runs an interactive menu by default; subcommands
//! cover the scripted paths.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kirke_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ScrapeArgs;

/// Kirkedata: church directory maintenance for the sogn.dk feed
#[derive(Parser, Debug)]
#[command(name = "kirke")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Feed URL (overrides config and env)
    #[arg(long, global = true, env = "KIRKE_FEED_URL")]
    feed_url: Option<String>,

    /// Dataset workbook path, bypasses the interactive file prompt of menu item 1
    #[arg(long, global = true, value_name = "PATH")]
    arg1: Option<PathBuf>,

    /// Account-status workbook path, bypasses the interactive file prompt of menu item 3
    #[arg(long, global = true, value_name = "PATH")]
    arg2: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// One-shot scrape: fetch the feed, optionally scrape staff, export
    #[command(visible_alias = "s")]
    Scrape(ScrapeArgs),

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing; default to info so warnings reach the operator
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.feed_url.clone())?;

    if cli.verbose {
        tracing::info!(
            feed_url = %config.feed.url,
            delay = ?config.scrape.delay,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("kirke {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Scrape(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Config) => {
            println!("Kirke Configuration");
            println!("===================");
            println!();
            println!("Feed:");
            println!("  url: {}", config.feed.url);
            println!();
            println!("Scrape:");
            println!("  delay: {:?}", config.scrape.delay);
            println!();
            println!("Export:");
            println!("  backup_path: {}", config.export.backup_path.display());
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            commands::menu::run(&config, cli.arg1.as_deref(), cli.arg2.as_deref())?;
        }
    }

    Ok(())
}
