//! Report assembly over a fetched record set

use chrono::NaiveDate;

use crate::models::{ExpenseRecord, ExpenseReport, InsightsReport, ReportPeriod};

use super::stats;

/// Build a summary report: totals plus daily and category groupings
pub fn build_report(records: &[ExpenseRecord], from: NaiveDate, to: NaiveDate) -> ExpenseReport {
    let daily_totals = stats::daily_totals(records);
    let category_totals = stats::category_totals(records);
    let total_amount = records.iter().map(|r| r.amount).sum();

    ExpenseReport {
        period: ReportPeriod {
            from: from.to_string(),
            to: to.to_string(),
        },
        total_amount,
        total_count: records.len() as i64,
        daily_totals,
        category_totals,
    }
}

/// Build the full statistical picture for a date range
pub fn build_insights(records: &[ExpenseRecord], from: NaiveDate, to: NaiveDate) -> InsightsReport {
    let dailies = stats::daily_totals(records);
    let slope = stats::trend_slope(&dailies);
    let period_days = (to - from).num_days() + 1;

    InsightsReport {
        period: ReportPeriod {
            from: from.to_string(),
            to: to.to_string(),
        },
        trend: stats::classify_trend(slope),
        trend_slope: slope,
        volatility: stats::volatility(&dailies),
        anomalies: stats::detect_anomalies(&dailies),
        correlations: stats::category_correlations(records),
        notable_days: stats::notable_days(records, &dailies),
        forecast: stats::forecast(records, &dailies, period_days),
    }
}
