//! Spending Trend Insight
//!
//! Classifies the direction of daily spending over the period and
//! reports its volatility (population standard deviation of daily
//! totals).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::TrendDirection;

use super::engine::{AnalysisContext, Insight};
use super::stats;
use super::types::{Finding, InsightType, Severity};

/// Structured payload for trend findings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrendData {
    pub trend: TrendDirection,
    pub slope: f64,
    pub volatility: f64,
    pub days: usize,
}

pub struct SpendingTrendInsight;

impl SpendingTrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingTrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingTrendInsight {
    fn id(&self) -> InsightType {
        InsightType::SpendingTrend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let dailies = stats::daily_totals(ctx.records);
        if dailies.is_empty() {
            return Ok(vec![]);
        }

        let slope = stats::trend_slope(&dailies);
        let trend = stats::classify_trend(slope);
        let volatility = stats::volatility(&dailies);

        let severity = match trend {
            TrendDirection::Increasing => Severity::Attention,
            _ => Severity::Info,
        };

        let summary = match trend {
            TrendDirection::Increasing => {
                format!("Daily spending is trending up (slope {:.2})", slope)
            }
            TrendDirection::Decreasing => {
                format!("Daily spending is trending down (slope {:.2})", slope)
            }
            TrendDirection::Stable => "Daily spending is holding steady".to_string(),
        };

        let data = SpendingTrendData {
            trend,
            slope,
            volatility,
            days: dailies.len(),
        };

        let key = format!("trend:{}:{}", ctx.date_range.0, ctx.date_range.1);
        let finding = Finding::new(InsightType::SpendingTrend, key, severity, "Spending Trend", summary)
            .with_data(serde_json::to_value(&data)?);

        Ok(vec![finding])
    }
}
