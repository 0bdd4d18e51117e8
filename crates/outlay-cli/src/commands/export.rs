//! Export command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use outlay_core::analytics::build_report;
use outlay_core::db::Database;
use outlay_core::export::{
    expenses_to_csv, report_to_csv, report_to_text, write_export, ExportFormat,
};

pub fn cmd_export_report(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
    output: &Path,
    format: &str,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let records = db.expenses_in_range(from, to)?;
    let report = build_report(&records, from, to);

    let contents = match format {
        ExportFormat::Csv => report_to_csv(&report),
        ExportFormat::Text => report_to_text(&report),
    };
    write_export(output, &contents).context("Failed to write report export")?;

    println!(
        "✅ Exported report {}..{} ({} expenses) to {}",
        report.period.from,
        report.period.to,
        report.total_count,
        output.display()
    );
    Ok(())
}

pub fn cmd_export_expenses(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
    output: &Path,
) -> Result<()> {
    let records = db.expenses_in_range(from, to)?;
    let csv = expenses_to_csv(&records)?;
    write_export(output, &csv).context("Failed to write expense export")?;

    println!(
        "✅ Exported {} expense(s) to {}",
        records.len(),
        output.display()
    );
    Ok(())
}
