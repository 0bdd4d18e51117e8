//! Domain models for Outlay

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Expense categories (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Staff,
    Travel,
    Food,
    Utility,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Travel => "travel",
            Self::Food => "food",
            Self::Utility => "utility",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Utility => "Utility",
        }
    }

    /// All categories, in display order
    pub fn all() -> [Category; 4] {
        [Self::Staff, Self::Travel, Self::Food, Self::Utility]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "travel" => Ok(Self::Travel),
            "food" => Ok(Self::Food),
            "utility" | "utilities" => Ok(Self::Utility),
            _ => Err(format!(
                "Unknown category: {} (valid: staff, travel, food, utility)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sync status tracking simulated backend reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Not yet pushed to the mock server
    #[default]
    Pending,
    /// Accepted by the mock server
    Synced,
    /// Last sync attempt failed; retried on the next pass
    Failed,
    /// Server version ahead of local version
    Conflict,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Synced => "synced",
            Self::Failed => "failed",
            Self::Conflict => "conflict",
        }
    }
}

impl std::str::FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "synced" => Ok(Self::Synced),
            "failed" => Ok(Self::Failed),
            "conflict" => Ok(Self::Conflict),
            _ => Err(format!("Unknown sync status: {}", s)),
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense record
///
/// Immutable after creation except for sync metadata, which is only
/// touched by the sync engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub notes: Option<String>,
    /// Reference to an attached receipt (path or external id)
    pub receipt_ref: Option<String>,
    /// Calendar date the expense applies to
    pub date: NaiveDate,
    pub sync_status: SyncStatus,
    /// Identifier assigned by the mock server once synced
    pub server_id: Option<String>,
    /// Incremented on every successful sync
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// A new expense to be validated and inserted
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub notes: Option<String>,
    pub receipt_ref: Option<String>,
    /// Expense date (defaults to today when None)
    pub date: Option<NaiveDate>,
}

// ========== Sync Models ==========

/// Type of a queued offline operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Create,
    Update,
    StatusChange,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::StatusChange => "status_change",
        }
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "status_change" => Ok(Self::StatusChange),
            _ => Err(format!("Unknown operation type: {}", s)),
        }
    }
}

/// Status of a queued offline operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown operation status: {}", s)),
        }
    }
}

/// A queued offline operation awaiting the next sync pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineOperation {
    pub id: i64,
    pub operation_type: OperationType,
    /// Entity kind the operation targets (currently always "expense")
    pub entity_type: String,
    pub entity_id: i64,
    pub status: OperationStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One entry in the sync audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLogEntry {
    pub id: i64,
    pub expense_id: i64,
    /// Status the expense ended the attempt in
    pub outcome: SyncStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of one sync pass over pending expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSummary {
    pub attempted: i64,
    pub synced: i64,
    pub failed: i64,
    pub conflicts: i64,
}

// ========== Derived Aggregates ==========
//
// All ephemeral: recomputed per request, owned by the caller, never
// persisted.

/// Sum of amounts for all records sharing a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
    pub count: i64,
}

/// Per-category total with percentage share of overall spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: i64,
    /// Share of total spend; shares sum to 100 when total > 0
    pub percentage: f64,
}

/// Trend classification from the OLS slope of daily totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far outside the norm an anomalous day is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    /// |z| > 2
    Low,
    /// |z| > 2.5
    Medium,
    /// |z| > 3
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A daily total flagged as a statistical outlier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnomaly {
    pub date: NaiveDate,
    pub total: f64,
    pub z_score: f64,
    pub severity: AnomalySeverity,
}

/// Strength labels for reported correlations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    /// 0.3 < |r| < 0.5
    Weak,
    /// 0.5 <= |r| < 0.7
    Moderate,
    /// |r| >= 0.7
    Strong,
}

impl CorrelationStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

/// Pearson correlation between two categories' per-record amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCorrelation {
    pub first: Category,
    pub second: Category,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Whether a notable day is a spending peak or a low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotableDayKind {
    Peak,
    Low,
}

/// A day whose total stands well above or below the period average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotableDay {
    pub date: NaiveDate,
    pub total: f64,
    pub count: i64,
    pub kind: NotableDayKind,
    /// Heuristic explanation (dominant category, many small expenses, ...)
    pub reason: String,
}

/// Per-category projection for the next period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForecast {
    pub category: Category,
    pub projected: f64,
}

/// Next-period spending projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingForecast {
    /// Length of the projected period in days
    pub period_days: i64,
    pub projected_total: f64,
    pub trend: TrendDirection,
    pub by_category: Vec<CategoryForecast>,
}

/// Report period info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: String,
    pub to: String,
}

/// Summary report over a date range: totals plus daily and category groupings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub period: ReportPeriod,
    pub total_amount: f64,
    pub total_count: i64,
    pub daily_totals: Vec<DailyTotal>,
    pub category_totals: Vec<CategoryTotal>,
}

/// Full statistical picture over a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub period: ReportPeriod,
    pub trend: TrendDirection,
    pub trend_slope: f64,
    /// Population standard deviation of daily totals
    pub volatility: f64,
    pub anomalies: Vec<SpendingAnomaly>,
    pub correlations: Vec<CategoryCorrelation>,
    pub notable_days: Vec<NotableDay>,
    pub forecast: SpendingForecast,
}
