//! Integration tests for outlay-core
//!
//! These tests exercise the full add → aggregate → export → sync
//! workflow against a real database.

use chrono::NaiveDate;

use outlay_core::{
    analytics::{build_insights, build_report, AnalysisContext, InsightEngine},
    db::Database,
    export::{expenses_to_csv, parse_summary_section, report_to_csv},
    models::{Category, NewExpense, SyncStatus, TrendDirection},
    sync::{SyncEngine, SyncOptions},
    validate::validate_date_range,
};

fn expense(title: &str, amount: f64, category: Category, date: &str) -> NewExpense {
    NewExpense {
        title: title.to_string(),
        amount,
        category,
        notes: None,
        receipt_ref: None,
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
    }
}

fn august() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
    )
}

/// Seed a month of spending with a rising daily pattern
fn seed_month(db: &Database) {
    for day in 1..=20 {
        let date = format!("2026-08-{:02}", day);
        db.insert_expense(&expense("Groceries", 20.0 + day as f64 * 5.0, Category::Food, &date))
            .unwrap();
        if day % 2 == 0 {
            db.insert_expense(&expense("Commute", 12.0, Category::Travel, &date))
                .unwrap();
        }
        if day % 5 == 0 {
            db.insert_expense(&expense("Electricity", 45.0, Category::Utility, &date))
                .unwrap();
        }
    }
}

// =============================================================================
// Store + Aggregation Workflow
// =============================================================================

#[test]
fn test_add_and_report_workflow() {
    let db = Database::in_memory().unwrap();
    seed_month(&db);

    let (from, to) = august();
    validate_date_range(from, to).unwrap();

    let records = db.expenses_in_range(from, to).unwrap();
    assert_eq!(records.len() as i64, db.count_expenses().unwrap());

    let report = build_report(&records, from, to);

    // Partition consistency across all three groupings
    let total: f64 = records.iter().map(|r| r.amount).sum();
    let daily_sum: f64 = report.daily_totals.iter().map(|d| d.total).sum();
    let category_sum: f64 = report.category_totals.iter().map(|c| c.total).sum();
    assert!((report.total_amount - total).abs() < 1e-9);
    assert!((daily_sum - total).abs() < 1e-9);
    assert!((category_sum - total).abs() < 1e-9);

    // Shares sum to 100 when anything was spent
    let shares: f64 = report.category_totals.iter().map(|c| c.percentage).sum();
    assert!((shares - 100.0).abs() < 1e-9);

    // Database aggregate agrees with the in-memory one
    assert!((db.total_amount().unwrap() - total).abs() < 1e-9);
}

#[test]
fn test_insights_over_rising_month() {
    let db = Database::in_memory().unwrap();
    seed_month(&db);

    let (from, to) = august();
    let records = db.expenses_in_range(from, to).unwrap();
    let insights = build_insights(&records, from, to);

    // Steadily rising dailies must classify as Increasing
    assert_eq!(insights.trend, TrendDirection::Increasing);
    assert!(insights.volatility > 0.0);
    assert_eq!(insights.forecast.period_days, 31);
    assert!(insights.forecast.projected_total > 0.0);

    // Engine findings cover the same ground
    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&records, (from, to));
    let findings = engine.analyze_all(&ctx).unwrap();
    assert!(!findings.is_empty());
    // Sorted by severity, highest first
    for pair in findings.windows(2) {
        assert!(pair[0].severity.priority() >= pair[1].severity.priority());
    }
}

// =============================================================================
// Export Round-Trip
// =============================================================================

#[test]
fn test_report_csv_round_trip() {
    let db = Database::in_memory().unwrap();
    seed_month(&db);

    let (from, to) = august();
    let records = db.expenses_in_range(from, to).unwrap();
    let report = build_report(&records, from, to);

    let csv = report_to_csv(&report);
    let parsed = parse_summary_section(&csv).unwrap();

    assert_eq!(parsed.total_amount, report.total_amount);
    assert_eq!(parsed.total_count, report.total_count);

    let flat = expenses_to_csv(&records).unwrap();
    assert_eq!(flat.lines().count(), records.len() + 1);
}

// =============================================================================
// Sync Workflow
// =============================================================================

#[tokio::test]
async fn test_sync_then_report_leaves_records_intact() {
    let db = Database::in_memory().unwrap();
    seed_month(&db);

    let before = db.count_expenses().unwrap();
    let pending_before = db.count_pending_sync().unwrap();
    assert_eq!(before, pending_before);

    let engine = SyncEngine::with_options(db.clone(), SyncOptions::deterministic());
    let summary = engine.sync_pending().await.unwrap();

    assert_eq!(summary.attempted, before);
    assert_eq!(summary.synced, before);
    assert_eq!(db.count_pending_sync().unwrap(), 0);

    // Sync touches only sync metadata: record contents and counts are unchanged
    assert_eq!(db.count_expenses().unwrap(), before);
    let (from, to) = august();
    let records = db.expenses_in_range(from, to).unwrap();
    assert!(records.iter().all(|r| r.sync_status == SyncStatus::Synced));
    assert!(records.iter().all(|r| r.version == 2));

    // A second pass has nothing to do
    let summary = engine.sync_pending().await.unwrap();
    assert_eq!(summary.attempted, 0);

    // Log retention keeps fresh entries
    engine.prune_logs().unwrap();
    assert_eq!(db.list_sync_log(1000).unwrap().len() as i64, before);
}
