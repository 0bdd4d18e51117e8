//! Category Links Insight
//!
//! Reports category pairs whose per-record amounts move together
//! (Pearson |r| > 0.3).

use crate::error::Result;
use crate::models::CorrelationStrength;

use super::engine::{AnalysisContext, Insight};
use super::stats;
use super::types::{Finding, InsightType, Severity};

pub struct CategoryLinksInsight;

impl CategoryLinksInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CategoryLinksInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for CategoryLinksInsight {
    fn id(&self) -> InsightType {
        InsightType::CategoryLinks
    }

    fn name(&self) -> &'static str {
        "Category Links"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let mut findings = vec![];

        for correlation in stats::category_correlations(ctx.records) {
            let severity = match correlation.strength {
                CorrelationStrength::Strong => Severity::Attention,
                _ => Severity::Info,
            };
            let direction = if correlation.coefficient > 0.0 {
                "together"
            } else {
                "in opposite directions"
            };
            let finding = Finding::new(
                InsightType::CategoryLinks,
                format!(
                    "correlation:{}:{}",
                    correlation.first.as_str(),
                    correlation.second.as_str()
                ),
                severity,
                "Linked Categories",
                format!(
                    "{} and {} spending move {} ({} correlation, r = {:.2})",
                    correlation.first.label(),
                    correlation.second.label(),
                    direction,
                    correlation.strength.as_str(),
                    correlation.coefficient
                ),
            )
            .with_data(serde_json::to_value(&correlation)?);
            findings.push(finding);
        }

        Ok(findings)
    }
}
