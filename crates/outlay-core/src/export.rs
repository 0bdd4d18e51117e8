//! Export functionality for expense reports and raw expense listings
//!
//! Supports:
//! - Sectioned report CSV (SUMMARY / DAILY / CATEGORY blocks) with a
//!   parser for the SUMMARY block so totals round-trip exactly
//! - Flat expense CSV
//! - A single-page plain-text report layout (title, summary block,
//!   daily table, category table)

use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, ExpenseReport};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Unknown export format: {} (valid: csv, text)", s)),
        }
    }
}

/// Totals re-parsed from a report CSV's SUMMARY section
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSummary {
    pub period_from: String,
    pub period_to: String,
    pub total_amount: f64,
    pub total_count: i64,
}

/// Escape a CSV field that might contain commas or quotes
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a report as sectioned CSV
///
/// The SUMMARY block writes the total with full float precision so a
/// re-parse reproduces the source value exactly; the table blocks use
/// two decimals for display.
pub fn report_to_csv(report: &ExpenseReport) -> String {
    let mut csv = String::from("SUMMARY\nfield,value\n");
    csv.push_str(&format!("period_from,{}\n", escape_csv_field(&report.period.from)));
    csv.push_str(&format!("period_to,{}\n", escape_csv_field(&report.period.to)));
    csv.push_str(&format!("total_amount,{}\n", report.total_amount));
    csv.push_str(&format!("total_count,{}\n", report.total_count));

    csv.push_str("\nDAILY\ndate,total,count\n");
    for day in &report.daily_totals {
        csv.push_str(&format!("{},{:.2},{}\n", day.date, day.total, day.count));
    }

    csv.push_str("\nCATEGORY\ncategory,total,count,percentage\n");
    for cat in &report.category_totals {
        csv.push_str(&format!(
            "{},{:.2},{},{:.2}\n",
            escape_csv_field(cat.category.as_str()),
            cat.total,
            cat.count,
            cat.percentage
        ));
    }

    csv
}

/// Re-parse the SUMMARY section of a report CSV
pub fn parse_summary_section(csv: &str) -> Result<ParsedSummary> {
    let mut period_from = None;
    let mut period_to = None;
    let mut total_amount = None;
    let mut total_count = None;

    let mut in_summary = false;
    for line in csv.lines() {
        let line = line.trim();
        if line == "SUMMARY" {
            in_summary = true;
            continue;
        }
        if !in_summary {
            continue;
        }
        if line.is_empty() {
            break; // End of section
        }
        let Some((field, value)) = line.split_once(',') else {
            continue;
        };
        match field {
            "period_from" => period_from = Some(value.to_string()),
            "period_to" => period_to = Some(value.to_string()),
            "total_amount" => {
                total_amount = Some(value.parse::<f64>().map_err(|e| {
                    Error::Export(format!("Invalid total_amount in SUMMARY: {}", e))
                })?)
            }
            "total_count" => {
                total_count = Some(value.parse::<i64>().map_err(|e| {
                    Error::Export(format!("Invalid total_count in SUMMARY: {}", e))
                })?)
            }
            _ => {}
        }
    }

    match (period_from, period_to, total_amount, total_count) {
        (Some(period_from), Some(period_to), Some(total_amount), Some(total_count)) => {
            Ok(ParsedSummary {
                period_from,
                period_to,
                total_amount,
                total_count,
            })
        }
        _ => Err(Error::Export(
            "Report CSV is missing a complete SUMMARY section".to_string(),
        )),
    }
}

/// Render expenses as flat CSV
pub fn expenses_to_csv(records: &[ExpenseRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "title", "amount", "category", "notes", "receipt", "sync_status"])?;

    for record in records {
        writer.write_record([
            record.date.to_string().as_str(),
            record.title.as_str(),
            &format!("{:.2}", record.amount),
            record.category.as_str(),
            record.notes.as_deref().unwrap_or(""),
            record.receipt_ref.as_deref().unwrap_or(""),
            record.sync_status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(format!("CSV writer flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(format!("CSV output not UTF-8: {}", e)))
}

/// Render a report as a single-page plain-text layout
pub fn report_to_text(report: &ExpenseReport) -> String {
    let mut out = String::new();
    out.push_str("EXPENSE REPORT\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!(
        "Period: {} to {}\n",
        report.period.from, report.period.to
    ));
    out.push_str(&format!("Total spent: {:.2}\n", report.total_amount));
    out.push_str(&format!("Expenses: {}\n\n", report.total_count));

    out.push_str("Daily totals\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&format!("{:<12} {:>12} {:>8}\n", "Date", "Total", "Count"));
    for day in &report.daily_totals {
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>8}\n",
            day.date.to_string(),
            day.total,
            day.count
        ));
    }

    out.push_str("\nBy category\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&format!(
        "{:<12} {:>12} {:>8} {:>8}\n",
        "Category", "Total", "Count", "Share"
    ));
    for cat in &report.category_totals {
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>8} {:>7.1}%\n",
            cat.category.label(),
            cat.total,
            cat.count,
            cat.percentage
        ));
    }

    out
}

/// Write export contents to a file
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}
