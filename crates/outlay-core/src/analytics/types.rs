//! Core types for the insight engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Direction and volatility of daily spending
    SpendingTrend,
    /// Statistical outlier days plus peak/low rankings
    AnomalousDays,
    /// Pairwise category correlations
    CategoryLinks,
    /// Next-period spending projection
    SpendingOutlook,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::SpendingTrend => "spending_trend",
            InsightType::AnomalousDays => "anomalous_days",
            InsightType::CategoryLinks => "category_links",
            InsightType::SpendingOutlook => "spending_outlook",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending_trend" => Ok(InsightType::SpendingTrend),
            "anomalous_days" => Ok(InsightType::AnomalousDays),
            "category_links" => Ok(InsightType::CategoryLinks),
            "spending_outlook" => Ok(InsightType::SpendingOutlook),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Severity level of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be looked at soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding produced by an insight analyzer
///
/// Findings are ephemeral: recomputed per request and owned by the
/// caller, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Type of insight that generated this finding
    pub insight_type: InsightType,
    /// Unique key for deduplication (e.g., "anomaly:2026-08-21")
    pub key: String,
    /// How urgent/important this finding is
    pub severity: Severity,
    /// Short title (e.g., "Spending Spike")
    pub title: String,
    /// One-line summary
    pub summary: String,
    /// Insight-specific structured data
    pub data: serde_json::Value,
    /// When this finding was computed
    pub detected_at: DateTime<Utc>,
}

impl Finding {
    /// Create a new finding with the current timestamp
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            key: key.into(),
            severity,
            title: title.into(),
            summary: summary.into(),
            data: serde_json::Value::Null,
            detected_at: Utc::now(),
        }
    }

    /// Attach structured data to the finding
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
