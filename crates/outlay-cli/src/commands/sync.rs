//! Sync and sync log command implementations

use anyhow::Result;
use outlay_core::db::Database;
use outlay_core::sync::{SyncEngine, SyncOptions};

use super::truncate;

pub async fn cmd_sync(db: Database, deterministic: bool) -> Result<()> {
    let pending = db.count_pending_sync()?;
    let queued = db.pending_operations()?.len();
    if pending == 0 && queued == 0 {
        println!("✅ Nothing to sync");
        return Ok(());
    }

    println!("🔄 Syncing {} pending expense(s)...", pending);

    let options = if deterministic {
        SyncOptions::deterministic()
    } else {
        SyncOptions::default()
    };
    let engine = SyncEngine::with_options(db, options);

    let summary = engine.sync_pending().await?;
    let (completed, failed_ops) = engine.process_offline_queue().await?;
    engine.prune_logs()?;

    println!(
        "   Synced: {}  Failed: {}  Conflicts: {}",
        summary.synced, summary.failed, summary.conflicts
    );
    if completed + failed_ops > 0 {
        println!(
            "   Offline queue: {} completed, {} failed",
            completed, failed_ops
        );
    }
    if summary.failed > 0 {
        println!("   Failed expenses will be retried on the next sync");
    }
    if summary.conflicts > 0 {
        println!("   Conflicted expenses need manual review (outlay log)");
    }

    Ok(())
}

pub fn cmd_log(db: &Database, limit: usize) -> Result<()> {
    let entries = db.list_sync_log(limit as i64)?;

    if entries.is_empty() {
        println!("Sync log is empty");
        return Ok(());
    }

    println!(
        "{:<5} {:<10} {:<10} {:<20} {}",
        "ID", "Expense", "Outcome", "When", "Detail"
    );
    println!("{}", "-".repeat(80));
    for entry in &entries {
        println!(
            "{:<5} {:<10} {:<10} {:<20} {}",
            entry.id,
            entry.expense_id,
            entry.outcome.as_str(),
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            truncate(entry.error_message.as_deref().unwrap_or("-"), 30)
        );
    }

    Ok(())
}
