//! Report command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use outlay_core::analytics::{build_insights, build_report};
use outlay_core::db::Database;
use outlay_core::validate::validate_date_range;

/// Resolve a period string to (from_date, to_date)
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    // If custom dates provided, use those
    if let (Some(from), Some(to)) = (custom_from, custom_to) {
        let from_date = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .context("Invalid --from date format (use YYYY-MM-DD)")?;
        let to_date = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .context("Invalid --to date format (use YYYY-MM-DD)")?;
        validate_date_range(from_date, to_date)?;
        return Ok((from_date, to_date));
    }

    let today = Utc::now().date_naive();

    match period.to_lowercase().as_str() {
        "this-month" => {
            let from = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
            Ok((from, today))
        }
        "last-month" => {
            let first_of_this = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
            let last_day = first_of_this.pred_opt().unwrap();
            let from = NaiveDate::from_ymd_opt(last_day.year(), last_day.month(), 1).unwrap();
            Ok((from, last_day))
        }
        "this-year" => {
            let from = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();
            Ok((from, today))
        }
        "last-30-days" => {
            let from = today - chrono::Duration::days(30);
            Ok((from, today))
        }
        "last-90-days" => {
            let from = today - chrono::Duration::days(90);
            Ok((from, today))
        }
        _ => anyhow::bail!(
            "Unknown period: {}. Available: this-month, last-month, this-year, last-30-days, last-90-days",
            period
        ),
    }
}

pub fn cmd_report_summary(db: &Database, from: NaiveDate, to: NaiveDate, json: bool) -> Result<()> {
    let records = db.expenses_in_range(from, to)?;
    let report = build_report(&records, from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("💰 Spending {} to {}", report.period.from, report.period.to);
    println!("   Total: {:.2} across {} expense(s)", report.total_amount, report.total_count);
    println!();

    println!("   {:<12} {:>12} {:>8}", "Date", "Total", "Count");
    for day in &report.daily_totals {
        println!("   {:<12} {:>12.2} {:>8}", day.date.to_string(), day.total, day.count);
    }

    println!();
    println!("   {:<10} {:>12} {:>8} {:>8}", "Category", "Total", "Count", "Share");
    for cat in &report.category_totals {
        println!(
            "   {:<10} {:>12.2} {:>8} {:>7.1}%",
            cat.category.label(),
            cat.total,
            cat.count,
            cat.percentage
        );
    }
    println!();

    Ok(())
}

pub fn cmd_report_insights(db: &Database, from: NaiveDate, to: NaiveDate, json: bool) -> Result<()> {
    let records = db.expenses_in_range(from, to)?;
    let insights = build_insights(&records, from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("🔍 Insights {} to {}", insights.period.from, insights.period.to);
    println!(
        "   Trend: {} (slope {:+.4}/day)",
        insights.trend.as_str(),
        insights.trend_slope
    );
    println!("   Volatility: {:.2}", insights.volatility);

    if insights.anomalies.is_empty() {
        println!("   Anomalies: none");
    } else {
        println!("   Anomalies:");
        for a in &insights.anomalies {
            println!(
                "     {} — {:.2} (z = {:+.2}, {})",
                a.date,
                a.total,
                a.z_score,
                a.severity.as_str()
            );
        }
    }

    if insights.correlations.is_empty() {
        println!("   Category links: none above threshold");
    } else {
        println!("   Category links:");
        for c in &insights.correlations {
            println!(
                "     {} ↔ {} — r = {:+.2} ({})",
                c.first.label(),
                c.second.label(),
                c.coefficient,
                c.strength.as_str()
            );
        }
    }

    if !insights.notable_days.is_empty() {
        println!("   Notable days:");
        for d in &insights.notable_days {
            println!("     {} — {:.2}: {}", d.date, d.total, d.reason);
        }
    }

    println!();
    println!(
        "   Forecast (next {} days): {:.2}",
        insights.forecast.period_days, insights.forecast.projected_total
    );
    for f in &insights.forecast.by_category {
        println!("     {:<10} {:>12.2}", f.category.label(), f.projected);
    }
    println!();

    Ok(())
}
