//! Expense record operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, ExpenseRecord, NewExpense, SyncStatus};
use crate::validate::validate_new_expense;

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<ExpenseRecord> {
    let category: String = row.get(3)?;
    let date: String = row.get(6)?;
    let sync_status: String = row.get(7)?;
    let created_at: String = row.get(10)?;

    Ok(ExpenseRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        category: category.parse().unwrap_or(Category::Utility),
        notes: row.get(4)?,
        receipt_ref: row.get(5)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        sync_status: sync_status.parse().unwrap_or_default(),
        server_id: row.get(8)?,
        version: row.get(9)?,
        created_at: parse_datetime(&created_at),
    })
}

const SELECT_COLS: &str =
    "id, title, amount, category, notes, receipt_ref, date, sync_status, server_id, version, created_at";

impl Database {
    /// Validate and insert a new expense, returning its id
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        validate_new_expense(expense)?;

        let conn = self.conn()?;
        let date = expense.date.unwrap_or_else(|| Utc::now().date_naive());

        conn.execute(
            r#"
            INSERT INTO expenses (title, amount, category, notes, receipt_ref, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                expense.title.trim(),
                expense.amount,
                expense.category.as_str(),
                expense.notes,
                expense.receipt_ref,
                date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Fetch a single expense by id
    pub fn get_expense(&self, id: i64) -> Result<ExpenseRecord> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM expenses WHERE id = ?", SELECT_COLS),
            params![id],
            row_to_expense,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("Expense {}", id)))
    }

    /// List expenses, most recent date first
    pub fn list_expenses(&self, limit: i64, offset: i64) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY date DESC, id DESC LIMIT ? OFFSET ?",
            SELECT_COLS
        ))?;
        let rows = stmt.query_map(params![limit, offset], row_to_expense)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Fetch all expenses within a date range (inclusive), date-ordered
    pub fn expenses_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE date BETWEEN ? AND ? ORDER BY date, id",
            SELECT_COLS
        ))?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], row_to_expense)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Total number of expense records
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    /// Sum of all expense amounts
    pub fn total_amount(&self) -> Result<f64> {
        let conn = self.conn()?;
        Ok(conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses",
            [],
            |row| row.get(0),
        )?)
    }

    /// Expenses awaiting sync (Pending or Failed)
    pub fn pending_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE sync_status IN ('pending', 'failed') ORDER BY id",
            SELECT_COLS
        ))?;
        let rows = stmt.query_map([], row_to_expense)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Count of expenses awaiting sync
    pub fn count_pending_sync(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE sync_status IN ('pending', 'failed')",
            [],
            |row| row.get(0),
        )?)
    }

    /// Update sync metadata for an expense
    ///
    /// This is the only mutation path for sync status, server id, and
    /// version; record fields themselves are immutable after creation.
    pub fn update_sync_status(
        &self,
        id: i64,
        status: SyncStatus,
        server_id: Option<&str>,
        version: Option<i64>,
    ) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE expenses
            SET sync_status = ?,
                server_id = COALESCE(?, server_id),
                version = COALESCE(?, version)
            WHERE id = ?
            "#,
            params![status.as_str(), server_id, version, id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Expense {}", id)));
        }
        Ok(())
    }
}
