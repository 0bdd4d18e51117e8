//! Spending Outlook Insight
//!
//! Projects spending for the next period of equal length from the
//! period's average daily total and trend slope.

use crate::error::Result;
use crate::models::TrendDirection;

use super::engine::{AnalysisContext, Insight};
use super::stats;
use super::types::{Finding, InsightType, Severity};

pub struct SpendingOutlookInsight;

impl SpendingOutlookInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingOutlookInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingOutlookInsight {
    fn id(&self) -> InsightType {
        InsightType::SpendingOutlook
    }

    fn name(&self) -> &'static str {
        "Spending Outlook"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let dailies = stats::daily_totals(ctx.records);
        if dailies.is_empty() {
            return Ok(vec![]);
        }

        let projection = stats::forecast(ctx.records, &dailies, ctx.period_days());

        let severity = if projection.trend == TrendDirection::Increasing {
            Severity::Attention
        } else {
            Severity::Info
        };

        let key = format!("outlook:{}:{}", ctx.date_range.0, ctx.date_range.1);
        let finding = Finding::new(
            InsightType::SpendingOutlook,
            key,
            severity,
            format!("{}-Day Outlook", projection.period_days),
            format!(
                "Projected spending for the next {} days: {:.2} ({} trend)",
                projection.period_days, projection.projected_total, projection.trend
            ),
        )
        .with_data(serde_json::to_value(&projection)?);

        Ok(vec![finding])
    }
}
