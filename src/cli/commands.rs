//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sobriety")]
#[command(about = "Terminal sobriety tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the record and config (default: SOBRIETY_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the start date and streak statistics
    Status,

    /// Log a relapse now; your streak restarts from today
    Relapse {
        /// Confirm logging the relapse
        #[arg(short, long)]
        yes: bool,
    },

    /// Reset all data and start fresh from now
    Reset {
        /// Confirm the reset (cannot be undone)
        #[arg(short, long)]
        yes: bool,
    },

    /// Change the start date (today, yesterday, 3 days ago, 2025-03-04, ...)
    StartDate {
        /// Date on or before today
        date: String,
    },

    /// Write a plain-text summary for sharing
    Export {
        /// Directory to write the summary into (default: config export_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Hand the summary to the configured share command
        #[arg(short, long)]
        share: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
