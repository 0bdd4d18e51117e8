//! Sync audit log and offline operation queue

use rusqlite::{params, Row};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{OfflineOperation, OperationStatus, OperationType, SyncLogEntry, SyncStatus};

fn row_to_log_entry(row: &Row<'_>) -> rusqlite::Result<SyncLogEntry> {
    let outcome: String = row.get(2)?;
    let created_at: String = row.get(4)?;
    Ok(SyncLogEntry {
        id: row.get(0)?,
        expense_id: row.get(1)?,
        outcome: outcome.parse().unwrap_or(SyncStatus::Failed),
        error_message: row.get(3)?,
        created_at: parse_datetime(&created_at),
    })
}

fn row_to_operation(row: &Row<'_>) -> rusqlite::Result<OfflineOperation> {
    let operation_type: String = row.get(1)?;
    let status: String = row.get(4)?;
    let created_at: String = row.get(6)?;
    Ok(OfflineOperation {
        id: row.get(0)?,
        operation_type: operation_type.parse().unwrap_or(OperationType::Update),
        entity_type: row.get(2)?,
        entity_id: row.get(3)?,
        status: status.parse().unwrap_or_default(),
        error_message: row.get(5)?,
        created_at: parse_datetime(&created_at),
    })
}

impl Database {
    /// Record the outcome of a sync attempt
    pub fn log_sync_operation(
        &self,
        expense_id: i64,
        outcome: SyncStatus,
        error_message: Option<&str>,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sync_log (expense_id, outcome, error_message) VALUES (?, ?, ?)",
            params![expense_id, outcome.as_str(), error_message],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent sync log entries
    pub fn list_sync_log(&self, limit: i64) -> Result<Vec<SyncLogEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, expense_id, outcome, error_message, created_at
             FROM sync_log ORDER BY id DESC LIMIT ?",
        )?;
        let rows = stmt.query_map(params![limit], row_to_log_entry)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete sync log entries older than the given number of days
    ///
    /// Retention cleanup applies to logs and completed operations only;
    /// expense records are never hard-deleted.
    pub fn prune_sync_log(&self, older_than_days: i64) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM sync_log WHERE created_at < datetime('now', ?)",
            params![format!("-{} days", older_than_days)],
        )?;
        let completed = conn.execute(
            "DELETE FROM offline_operations
             WHERE status = 'completed' AND created_at < datetime('now', ?)",
            params![format!("-{} days", older_than_days)],
        )?;

        if deleted + completed > 0 {
            info!(
                logs = deleted,
                operations = completed,
                "Pruned old sync records"
            );
        }
        Ok(deleted + completed)
    }

    /// Queue an operation for the next sync pass
    pub fn enqueue_operation(&self, operation_type: OperationType, entity_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO offline_operations (operation_type, entity_type, entity_id)
             VALUES (?, 'expense', ?)",
            params![operation_type.as_str(), entity_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Operations still awaiting processing
    pub fn pending_operations(&self) -> Result<Vec<OfflineOperation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, operation_type, entity_type, entity_id, status, error_message, created_at
             FROM offline_operations WHERE status IN ('pending', 'in_progress') ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_operation)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Mark a queued operation's outcome
    pub fn mark_operation(
        &self,
        id: i64,
        status: OperationStatus,
        error_message: Option<&str>,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE offline_operations SET status = ?, error_message = ? WHERE id = ?",
            params![status.as_str(), error_message, id],
        )?;
        Ok(())
    }
}
