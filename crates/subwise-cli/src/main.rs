//! Subwise CLI - Subscription spending analyzer
//!
//! Usage:
//!   subwise score --file subs.json          Score likely-unused subscriptions
//!   subwise recommend --file subs.json      Generate savings recommendations
//!   subwise summary --file subs.json        Narrate the monthly spend

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Score {
            file,
            now,
            seed,
            json,
        } => commands::cmd_score(&file, now.as_deref(), seed, json),
        Commands::Recommend {
            file,
            prefs,
            seed,
            json,
        } => commands::cmd_recommend(&file, prefs.as_deref(), seed, json),
        Commands::Summary {
            file,
            prefs,
            history,
        } => commands::cmd_summary(&file, prefs.as_deref(), history.as_deref()),
    }
}
