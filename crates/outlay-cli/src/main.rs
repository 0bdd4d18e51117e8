//! Outlay CLI - Expense tracker
//!
//! Usage:
//!   outlay init                       Initialize database
//!   outlay add --title X --amount N   Record an expense
//!   outlay report insights            Statistics over a period
//!   outlay sync                       Push pending expenses (simulated)

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Add {
            title,
            amount,
            category,
            notes,
            date,
            receipt,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(
                &db,
                &title,
                amount,
                &category,
                notes.as_deref(),
                date.as_deref(),
                receipt.as_deref(),
            )
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_list(&db, limit)
        }
        Commands::Report { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                ReportAction::Summary {
                    period,
                    from,
                    to,
                    json,
                } => {
                    let (from, to) =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
                    commands::cmd_report_summary(&db, from, to, json)
                }
                ReportAction::Insights {
                    period,
                    from,
                    to,
                    json,
                } => {
                    let (from, to) =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
                    commands::cmd_report_insights(&db, from, to, json)
                }
            }
        }
        Commands::Export { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                ExportAction::Report {
                    period,
                    from,
                    to,
                    output,
                    format,
                } => {
                    let (from, to) =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
                    commands::cmd_export_report(&db, from, to, &output, &format)
                }
                ExportAction::Expenses {
                    period,
                    from,
                    to,
                    output,
                } => {
                    let (from, to) =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
                    commands::cmd_export_expenses(&db, from, to, &output)
                }
            }
        }
        Commands::Sync { deterministic } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_sync(db, deterministic).await
        }
        Commands::Log { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_log(&db, limit)
        }
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
    }
}
