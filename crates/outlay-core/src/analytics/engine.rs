//! Insight engine - orchestrates analyzers over a fetched record set

use chrono::NaiveDate;

use crate::models::ExpenseRecord;
use crate::Result;

use super::types::{Finding, InsightType};
use super::{
    AnomalousDaysInsight, CategoryLinksInsight, SpendingOutlookInsight, SpendingTrendInsight,
};

/// Context provided to insight analyzers
///
/// Holds the records for the requested range; analyzers are pure over
/// this input and never touch the store themselves.
pub struct AnalysisContext<'a> {
    /// Records for the analysis range, date-ordered
    pub records: &'a [ExpenseRecord],
    /// Date range for analysis (start, end)
    pub date_range: (NaiveDate, NaiveDate),
}

impl<'a> AnalysisContext<'a> {
    pub fn new(records: &'a [ExpenseRecord], date_range: (NaiveDate, NaiveDate)) -> Self {
        Self {
            records,
            date_range,
        }
    }

    /// Length of the analysis period in days (inclusive)
    pub fn period_days(&self) -> i64 {
        (self.date_range.1 - self.date_range.0).num_days() + 1
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze the context and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(SpendingTrendInsight::new()));
        engine.register(Box::new(AnomalousDaysInsight::new()));
        engine.register(Box::new(CategoryLinksInsight::new()));
        engine.register(Box::new(SpendingOutlookInsight::new()));

        engine
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// A failing analyzer is logged and skipped; the rest still run.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Sort by severity (highest first), then by key for stable output
        all_findings.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.key.cmp(&b.key))
        });

        Ok(all_findings)
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
