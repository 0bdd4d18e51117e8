//! Anomalous Days Insight
//!
//! Flags daily totals that are statistical outliers (z-score against
//! the full-period mean) and ranks peak/low days against the period
//! average.

use crate::error::Result;
use crate::models::{AnomalySeverity, NotableDayKind};

use super::engine::{AnalysisContext, Insight};
use super::stats;
use super::types::{Finding, InsightType, Severity};

pub struct AnomalousDaysInsight;

impl AnomalousDaysInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnomalousDaysInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for AnomalousDaysInsight {
    fn id(&self) -> InsightType {
        InsightType::AnomalousDays
    }

    fn name(&self) -> &'static str {
        "Anomalous Days"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let dailies = stats::daily_totals(ctx.records);
        let mut findings = vec![];

        for anomaly in stats::detect_anomalies(&dailies) {
            let severity = match anomaly.severity {
                AnomalySeverity::High => Severity::Warning,
                AnomalySeverity::Medium => Severity::Attention,
                AnomalySeverity::Low => Severity::Info,
            };
            let direction = if anomaly.z_score > 0.0 { "above" } else { "below" };
            let finding = Finding::new(
                InsightType::AnomalousDays,
                format!("anomaly:{}", anomaly.date),
                severity,
                "Spending Spike",
                format!(
                    "{} was {:.1} standard deviations {} your daily average",
                    anomaly.date,
                    anomaly.z_score.abs(),
                    direction
                ),
            )
            .with_data(serde_json::to_value(&anomaly)?);
            findings.push(finding);
        }

        for day in stats::notable_days(ctx.records, &dailies) {
            let (title, key_prefix) = match day.kind {
                NotableDayKind::Peak => ("Peak Spending Day", "peak"),
                NotableDayKind::Low => ("Low Spending Day", "low"),
            };
            let finding = Finding::new(
                InsightType::AnomalousDays,
                format!("{}:{}", key_prefix, day.date),
                Severity::Info,
                title,
                format!("{}: {:.2} - {}", day.date, day.total, day.reason),
            )
            .with_data(serde_json::to_value(&day)?);
            findings.push(finding);
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{range_of, records_with_daily_totals};

    #[test]
    fn test_two_days_never_anomalous() {
        let records = records_with_daily_totals(&[10.0, 10_000.0]);
        let ctx = AnalysisContext::new(&records, range_of(&records));

        let findings = AnomalousDaysInsight::new().analyze(&ctx).unwrap();
        assert!(findings.iter().all(|f| !f.key.starts_with("anomaly:")));
    }

    #[test]
    fn test_outlier_produces_anomaly_and_peak() {
        let mut totals = vec![100.0; 20];
        totals.push(900.0);
        let records = records_with_daily_totals(&totals);
        let ctx = AnalysisContext::new(&records, range_of(&records));

        let findings = AnomalousDaysInsight::new().analyze(&ctx).unwrap();
        assert!(findings.iter().any(|f| f.key.starts_with("anomaly:")));
        assert!(findings.iter().any(|f| f.key.starts_with("peak:")));
    }

    #[test]
    fn test_high_severity_maps_to_warning() {
        let mut totals = vec![100.0; 30];
        totals.push(2000.0);
        let records = records_with_daily_totals(&totals);
        let ctx = AnalysisContext::new(&records, range_of(&records));

        let findings = AnomalousDaysInsight::new().analyze(&ctx).unwrap();
        let anomaly = findings
            .iter()
            .find(|f| f.key.starts_with("anomaly:"))
            .unwrap();
        assert_eq!(anomaly.severity, Severity::Warning);
    }
}
