//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Subwise - Understand and trim your subscription spending
#[derive(Parser)]
#[command(name = "subwise")]
#[command(about = "Subscription spending analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score each subscription's likelihood of being unused
    Score {
        /// JSON subscription snapshot (array of store records)
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        now: Option<String>,

        /// Seed the random source for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate money-saving recommendations
    Recommend {
        /// JSON subscription snapshot (array of store records)
        #[arg(short, long)]
        file: PathBuf,

        /// JSON budget preferences (budget analysis is skipped without it)
        #[arg(short, long)]
        prefs: Option<PathBuf>,

        /// Seed the random source for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Emit JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Compose the monthly spending summary
    Summary {
        /// JSON subscription snapshot (array of store records)
        #[arg(short, long)]
        file: PathBuf,

        /// JSON budget preferences (budget analysis is skipped without it)
        #[arg(short, long)]
        prefs: Option<PathBuf>,

        /// JSON spend history ({"YYYY-MM-DD": total} per month)
        #[arg(long)]
        history: Option<PathBuf>,
    },
}
