//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_add` - Record an expense
//! - `cmd_list` - List recent expenses
//! - `cmd_status` - Database and sync overview

use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::db::Database;
use outlay_core::models::{Category, NewExpense, OperationType};
use tracing::debug;

use super::truncate;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    debug!(path = %db_path.display(), no_encrypt, "Opening database");
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: outlay add --title Lunch --amount 12.50 --category food");
    println!("  2. See where it went: outlay report insights");

    Ok(())
}

pub fn cmd_add(
    db: &Database,
    title: &str,
    amount: f64,
    category: &str,
    notes: Option<&str>,
    date: Option<&str>,
    receipt: Option<&str>,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let date = date
        .map(|d| {
            chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .context("Invalid --date format (use YYYY-MM-DD)")
        })
        .transpose()?;

    let id = db.insert_expense(&NewExpense {
        title: title.to_string(),
        amount,
        category,
        notes: notes.map(str::to_string),
        receipt_ref: receipt.map(str::to_string),
        date,
    })?;
    db.enqueue_operation(OperationType::Create, id)?;
    debug!(expense_id = id, "Queued create operation for next sync");

    let expense = db.get_expense(id)?;
    println!(
        "✅ Recorded #{}: {} — {:.2} ({}) on {}",
        id,
        expense.title,
        expense.amount,
        expense.category.label(),
        expense.date
    );

    Ok(())
}

pub fn cmd_list(db: &Database, limit: usize) -> Result<()> {
    let expenses = db.list_expenses(limit as i64, 0)?;

    if expenses.is_empty() {
        println!("No expenses recorded yet. Try: outlay add --title Lunch --amount 12.50 --category food");
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<30} {:>10} {:<10} {:<8}",
        "ID", "Date", "Title", "Amount", "Category", "Sync"
    );
    println!("{}", "-".repeat(80));
    for e in &expenses {
        println!(
            "{:<5} {:<12} {:<30} {:>10.2} {:<10} {:<8}",
            e.id,
            e.date.to_string(),
            truncate(&e.title, 30),
            e.amount,
            e.category.label(),
            e.sync_status.as_str()
        );
    }
    println!();
    println!("{} expense(s) shown", expenses.len());

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    use outlay_core::db::DB_KEY_ENV;
    use std::fs;

    println!();
    println!("📊 Outlay Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Check encryption status
    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    // Try to open the database and show stats
    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                println!();
                if let Ok(encrypted) = db.is_encrypted() {
                    println!("   Cipher active: {}", if encrypted { "yes" } else { "no" });
                }
                println!("   Expenses: {}", db.count_expenses()?);
                println!("   Total spent: {:.2}", db.total_amount()?);
                println!("   Pending sync: {}", db.count_pending_sync()?);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
