//! Aggregation core: pure statistics and the insight engine
//!
//! Turns a flat list of expense records for a date range into
//! structured statistics, with no side effects and no stored state.
//! All derived aggregates are ephemeral and recomputed per request.

mod anomalous_days;
mod category_links;
pub mod engine;
pub mod report;
mod spending_outlook;
mod spending_trend;
pub mod stats;
pub mod types;

pub use anomalous_days::AnomalousDaysInsight;
pub use category_links::CategoryLinksInsight;
pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use report::{build_insights, build_report};
pub use spending_outlook::SpendingOutlookInsight;
pub use spending_trend::{SpendingTrendData, SpendingTrendInsight};
pub use types::{Finding, InsightType, Severity};

/// Shared helpers for analytics tests
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, NaiveDate, Utc};

    use crate::models::{Category, ExpenseRecord, SyncStatus};

    /// Build a record on a fixed date
    pub fn record_on(date: &str, amount: f64, category: Category) -> ExpenseRecord {
        ExpenseRecord {
            id: 0,
            title: "test".to_string(),
            amount,
            category,
            notes: None,
            receipt_ref: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            sync_status: SyncStatus::Pending,
            server_id: None,
            version: 1,
            created_at: Utc::now(),
        }
    }

    /// One record per day, starting 2026-08-01, with the given totals
    pub fn records_with_daily_totals(totals: &[f64]) -> Vec<ExpenseRecord> {
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        totals
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                let date = start + Duration::days(i as i64);
                record_on(&date.to_string(), amount, Category::Food)
            })
            .collect()
    }

    /// Date range covering the records (or a default empty-month range)
    pub fn range_of(records: &[ExpenseRecord]) -> (NaiveDate, NaiveDate) {
        let fallback = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let from = records.iter().map(|r| r.date).min().unwrap_or(fallback);
        let to = records.iter().map(|r| r.date).max().unwrap_or(fallback);
        (from, to)
    }
}
