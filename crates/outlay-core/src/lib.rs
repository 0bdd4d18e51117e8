//! Outlay Core Library
//!
//! Shared functionality for the Outlay expense tracker:
//! - Database access and migrations (SQLite via rusqlite/r2d2)
//! - Expense validation rules
//! - Aggregation core: pure statistics over expense records
//! - Insight engine producing ranked findings
//! - CSV and plain-text report export
//! - Simulated background sync with audit logging

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod sync;
pub mod validate;

pub use analytics::{
    build_insights, build_report, AnalysisContext, Finding, Insight, InsightEngine, InsightType,
    Severity,
};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{ExportFormat, ParsedSummary};
pub use sync::{SyncEngine, SyncOptions};
pub use validate::{validate_date_range, validate_new_expense};
