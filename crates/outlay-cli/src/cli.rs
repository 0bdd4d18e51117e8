//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track expenses, spot the patterns
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Expense tracker with statistical insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "outlay.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set OUTLAY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// What the money went on
        #[arg(short, long)]
        title: String,

        /// Amount spent (positive, up to 999,999.99)
        #[arg(short, long)]
        amount: f64,

        /// Category: staff, travel, food, utility
        #[arg(short, long)]
        category: String,

        /// Optional notes (up to 100 characters)
        #[arg(short, long)]
        notes: Option<String>,

        /// Expense date YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Receipt reference (file path or identifier)
        #[arg(short, long)]
        receipt: Option<String>,
    },

    /// List recent expenses
    List {
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Generate reports over a period
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export reports or raw expenses to a file
    Export {
        #[command(subcommand)]
        action: ExportAction,
    },

    /// Push pending expenses to the (simulated) server
    Sync {
        /// Disable simulated latency and failure injection
        #[arg(long)]
        deterministic: bool,
    },

    /// Show recent sync log entries
    Log {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show database and sync status
    Status,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Totals by day and category
    Summary {
        /// Period shortcut: this-month, last-month, this-year, last-30-days, last-90-days
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD, overrides --period with --to)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD, overrides --period with --from)
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Trend, volatility, anomalies, correlations, forecast
    Insights {
        /// Period shortcut: this-month, last-month, this-year, last-30-days, last-90-days
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD, overrides --period with --to)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD, overrides --period with --from)
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ExportAction {
    /// Sectioned report (SUMMARY / DAILY / CATEGORY)
    Report {
        /// Period shortcut: this-month, last-month, this-year, last-30-days, last-90-days
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: csv, text
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Flat CSV of individual expenses
    Expenses {
        /// Period shortcut: this-month, last-month, this-year, last-30-days, last-90-days
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}
