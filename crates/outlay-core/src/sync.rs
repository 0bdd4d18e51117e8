//! Simulated background sync
//!
//! Stands in for a real backend: each pending expense is "pushed" to a
//! mock server after a fixed simulated latency. The mock server can
//! accept (Synced, version incremented), reject (Failed, retried on the
//! next pass), or report a newer server-side version (Conflict). Every
//! attempt is recorded in the sync log, and failures never propagate.
//!
//! The randomness is a stand-in with no design intent; tests run with
//! `SyncOptions::deterministic()`.

use rand::Rng;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::Result;
use crate::models::{OperationStatus, SyncStatus, SyncSummary};

/// Tuning knobs for the simulated server
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Fixed per-record latency in milliseconds
    pub latency_ms: u64,
    /// Probability of a simulated network failure per record
    pub failure_rate: f64,
    /// Probability the mock server reports a newer version (conflict)
    pub conflict_rate: f64,
    /// Sync log retention window in days
    pub retention_days: i64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            latency_ms: 120,
            failure_rate: 0.10,
            conflict_rate: 0.15,
            retention_days: 30,
        }
    }
}

impl SyncOptions {
    /// No latency, no failure injection, no conflicts (for tests and
    /// scripted runs)
    pub fn deterministic() -> Self {
        Self {
            latency_ms: 0,
            failure_rate: 0.0,
            conflict_rate: 0.0,
            retention_days: 30,
        }
    }
}

/// What the mock server decided for one pushed record
enum MockResponse {
    /// Accepted: assigned server id and new version
    Accepted { server_id: String, version: i64 },
    /// Transient failure; record stays retryable
    Rejected(String),
    /// Server holds a newer version than the local record
    VersionConflict { server_version: i64 },
}

/// Simulated sync engine over the expense store
pub struct SyncEngine {
    db: Database,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(db: Database) -> Self {
        Self::with_options(db, SyncOptions::default())
    }

    pub fn with_options(db: Database, options: SyncOptions) -> Self {
        Self { db, options }
    }

    /// Roll the mock server's decision for one record
    fn mock_server_response(&self, expense_id: i64, local_version: i64) -> MockResponse {
        let mut rng = rand::thread_rng();

        if rng.gen::<f64>() < self.options.failure_rate {
            return MockResponse::Rejected("Simulated network failure".to_string());
        }
        if rng.gen::<f64>() < self.options.conflict_rate {
            return MockResponse::VersionConflict {
                server_version: local_version + rng.gen_range(1..=2),
            };
        }
        MockResponse::Accepted {
            server_id: format!("srv-{}", expense_id),
            version: local_version + 1,
        }
    }

    /// Push all Pending/Failed expenses to the mock server
    ///
    /// Per-record failures are logged and leave the record retryable;
    /// only store errors propagate.
    pub async fn sync_pending(&self) -> Result<SyncSummary> {
        let pending = self.db.pending_expenses()?;
        let mut summary = SyncSummary::default();

        info!(count = pending.len(), "Starting sync pass");

        for expense in pending {
            summary.attempted += 1;

            if self.options.latency_ms > 0 {
                sleep(Duration::from_millis(self.options.latency_ms)).await;
            }

            match self.mock_server_response(expense.id, expense.version) {
                MockResponse::Accepted { server_id, version } => {
                    self.db.update_sync_status(
                        expense.id,
                        SyncStatus::Synced,
                        Some(&server_id),
                        Some(version),
                    )?;
                    self.db
                        .log_sync_operation(expense.id, SyncStatus::Synced, None)?;
                    summary.synced += 1;
                    debug!(expense_id = expense.id, server_id, "Expense synced");
                }
                MockResponse::Rejected(reason) => {
                    self.db
                        .update_sync_status(expense.id, SyncStatus::Failed, None, None)?;
                    self.db
                        .log_sync_operation(expense.id, SyncStatus::Failed, Some(&reason))?;
                    summary.failed += 1;
                    warn!(expense_id = expense.id, reason, "Sync attempt failed");
                }
                MockResponse::VersionConflict { server_version } => {
                    self.db
                        .update_sync_status(expense.id, SyncStatus::Conflict, None, None)?;
                    let message = format!(
                        "Server version {} ahead of local {}",
                        server_version, expense.version
                    );
                    self.db.log_sync_operation(
                        expense.id,
                        SyncStatus::Conflict,
                        Some(&message),
                    )?;
                    summary.conflicts += 1;
                    warn!(expense_id = expense.id, server_version, "Sync conflict");
                }
            }
        }

        info!(
            synced = summary.synced,
            failed = summary.failed,
            conflicts = summary.conflicts,
            "Sync pass complete"
        );
        Ok(summary)
    }

    /// Drain the offline operation queue
    ///
    /// Operations referring to missing expenses are marked Failed; the
    /// rest complete against the mock server.
    pub async fn process_offline_queue(&self) -> Result<(i64, i64)> {
        let operations = self.db.pending_operations()?;
        let mut completed = 0;
        let mut failed = 0;

        for operation in operations {
            self.db
                .mark_operation(operation.id, OperationStatus::InProgress, None)?;

            if self.options.latency_ms > 0 {
                sleep(Duration::from_millis(self.options.latency_ms)).await;
            }

            match self.db.get_expense(operation.entity_id) {
                Ok(_) => {
                    self.db
                        .mark_operation(operation.id, OperationStatus::Completed, None)?;
                    completed += 1;
                }
                Err(e) => {
                    self.db.mark_operation(
                        operation.id,
                        OperationStatus::Failed,
                        Some(&e.to_string()),
                    )?;
                    failed += 1;
                    warn!(operation_id = operation.id, error = %e, "Offline operation failed");
                }
            }
        }

        Ok((completed, failed))
    }

    /// Retention cleanup of sync logs and completed operations
    pub fn prune_logs(&self) -> Result<usize> {
        self.db.prune_sync_log(self.options.retention_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewExpense, OperationType};
    use chrono::NaiveDate;

    fn seed(db: &Database, title: &str) -> i64 {
        db.insert_expense(&NewExpense {
            title: title.to_string(),
            amount: 25.0,
            category: Category::Food,
            notes: None,
            receipt_ref: None,
            date: Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_deterministic_sync_marks_all_synced() {
        let db = Database::in_memory().unwrap();
        let a = seed(&db, "A");
        let b = seed(&db, "B");

        let engine = SyncEngine::with_options(db.clone(), SyncOptions::deterministic());
        let summary = engine.sync_pending().await.unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.synced, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.conflicts, 0);

        for id in [a, b] {
            let expense = db.get_expense(id).unwrap();
            assert_eq!(expense.sync_status, SyncStatus::Synced);
            assert_eq!(expense.version, 2);
            assert_eq!(expense.server_id.as_deref(), Some(format!("srv-{}", id).as_str()));
        }

        // One log entry per attempt
        assert_eq!(db.list_sync_log(10).unwrap().len(), 2);
        // Nothing left to sync
        assert_eq!(db.count_pending_sync().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_forced_failures_stay_retryable() {
        let db = Database::in_memory().unwrap();
        let id = seed(&db, "A");

        let options = SyncOptions {
            latency_ms: 0,
            failure_rate: 1.0,
            conflict_rate: 0.0,
            retention_days: 30,
        };
        let engine = SyncEngine::with_options(db.clone(), options);
        let summary = engine.sync_pending().await.unwrap();

        assert_eq!(summary.failed, 1);
        let expense = db.get_expense(id).unwrap();
        assert_eq!(expense.sync_status, SyncStatus::Failed);
        assert_eq!(expense.version, 1);

        // Failed records are picked up by the next pass
        assert_eq!(db.pending_expenses().unwrap().len(), 1);

        let log = db.list_sync_log(10).unwrap();
        assert_eq!(log[0].outcome, SyncStatus::Failed);
        assert!(log[0].error_message.is_some());
    }

    #[tokio::test]
    async fn test_forced_conflicts() {
        let db = Database::in_memory().unwrap();
        let id = seed(&db, "A");

        let options = SyncOptions {
            latency_ms: 0,
            failure_rate: 0.0,
            conflict_rate: 1.0,
            retention_days: 30,
        };
        let engine = SyncEngine::with_options(db.clone(), options);
        let summary = engine.sync_pending().await.unwrap();

        assert_eq!(summary.conflicts, 1);
        let expense = db.get_expense(id).unwrap();
        assert_eq!(expense.sync_status, SyncStatus::Conflict);

        // Conflicted records are not retried automatically
        assert!(db.pending_expenses().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_queue_processing() {
        let db = Database::in_memory().unwrap();
        let id = seed(&db, "A");
        db.enqueue_operation(OperationType::Create, id).unwrap();
        db.enqueue_operation(OperationType::Update, 9999).unwrap();

        let engine = SyncEngine::with_options(db.clone(), SyncOptions::deterministic());
        let (completed, failed) = engine.process_offline_queue().await.unwrap();

        assert_eq!(completed, 1);
        assert_eq!(failed, 1);
        assert!(db.pending_operations().unwrap().is_empty());
    }
}
