//! Input validation for user-entered expenses and report date ranges
//!
//! Runs before anything reaches the store or the aggregation core, so
//! aggregation can assume already-validated in-memory data.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// Maximum length for titles and notes
pub const MAX_TEXT_LEN: usize = 100;

/// Maximum accepted expense amount
pub const MAX_AMOUNT: f64 = 999_999.99;

/// Longest report range accepted, in days (one year, leap-safe)
pub const MAX_RANGE_DAYS: i64 = 366;

/// Validate a user-entered expense before persistence
pub fn validate_new_expense(expense: &NewExpense) -> Result<()> {
    if expense.title.trim().is_empty() {
        return Err(Error::Validation(
            "Expense title cannot be blank".to_string(),
        ));
    }
    if expense.title.chars().count() > MAX_TEXT_LEN {
        return Err(Error::Validation(format!(
            "Expense title cannot exceed {} characters",
            MAX_TEXT_LEN
        )));
    }
    if expense.amount <= 0.0 || !expense.amount.is_finite() {
        return Err(Error::Validation(
            "Expense amount must be a positive number".to_string(),
        ));
    }
    if expense.amount > MAX_AMOUNT {
        return Err(Error::Validation(
            "Expense amount cannot exceed 999,999.99".to_string(),
        ));
    }
    if let Some(notes) = &expense.notes {
        if notes.chars().count() > MAX_TEXT_LEN {
            return Err(Error::Validation(format!(
                "Notes cannot exceed {} characters",
                MAX_TEXT_LEN
            )));
        }
    }
    Ok(())
}

/// Validate a report date range before it reaches aggregation
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from > to {
        return Err(Error::Validation(
            "Start date must not be after end date".to_string(),
        ));
    }
    let days = (to - from).num_days();
    if days > MAX_RANGE_DAYS {
        return Err(Error::Validation(format!(
            "Date range cannot exceed one year ({} days requested)",
            days
        )));
    }
    Ok(())
}
