//! Pure statistics over expense records
//!
//! Everything in this module is side-effect free: functions take a slice
//! of already-validated records (plus a date range where relevant) and
//! return derived values owned by the caller. Degenerate inputs produce
//! neutral or empty results rather than errors.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    AnomalySeverity, Category, CategoryCorrelation, CategoryForecast, CategoryTotal,
    CorrelationStrength, DailyTotal, ExpenseRecord, NotableDay, NotableDayKind, SpendingAnomaly,
    SpendingForecast, TrendDirection,
};

/// Slope threshold separating Stable from Increasing/Decreasing
pub const TREND_THRESHOLD: f64 = 0.1;

/// Minimum |z| for a daily total to be flagged as anomalous
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// Minimum |r| for a category pair to be reported
pub const CORRELATION_THRESHOLD: f64 = 0.3;

/// Partition records by calendar date, summing amounts and counts per day
///
/// Output is sorted by date ascending.
pub fn daily_totals(records: &[ExpenseRecord]) -> Vec<DailyTotal> {
    let mut buckets: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (total, count))| DailyTotal { date, total, count })
        .collect()
}

/// Partition records by category with percentage share of overall spend
///
/// Shares sum to 100 (within floating point) whenever the overall total
/// is positive. Output follows the fixed category display order, with
/// absent categories omitted.
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut buckets: BTreeMap<Category, (f64, i64)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(record.category).or_insert((0.0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    let grand_total: f64 = buckets.values().map(|(total, _)| total).sum();

    Category::all()
        .into_iter()
        .filter_map(|category| {
            buckets.get(&category).map(|&(total, count)| CategoryTotal {
                category,
                total,
                count,
                percentage: if grand_total > 0.0 {
                    (total / grand_total) * 100.0
                } else {
                    0.0
                },
            })
        })
        .collect()
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for fewer than 2 values
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary-least-squares slope over the time-ordered daily totals
///
/// X is the day index within the sequence, Y the daily total. Returns 0
/// for fewer than 2 points. The denominator `n*Sxx - Sx^2` is zero only
/// when n <= 1, which the guard excludes.
pub fn trend_slope(dailies: &[DailyTotal]) -> f64 {
    let n = dailies.len();
    if n < 2 {
        return 0.0;
    }

    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, day) in dailies.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += day.total;
        sum_xy += x * day.total;
        sum_xx += x * x;
    }

    let denominator = nf * sum_xx - sum_x * sum_x;
    debug_assert!(denominator != 0.0, "distinct day indices with n >= 2");

    (nf * sum_xy - sum_x * sum_y) / denominator
}

/// Classify a slope against the +/-0.1 thresholds
pub fn classify_trend(slope: f64) -> TrendDirection {
    if slope > TREND_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -TREND_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Population standard deviation of daily totals; 0 for fewer than 2 days
pub fn volatility(dailies: &[DailyTotal]) -> f64 {
    let totals: Vec<f64> = dailies.iter().map(|d| d.total).collect();
    population_std_dev(&totals)
}

fn severity_for(z_abs: f64) -> AnomalySeverity {
    if z_abs > 3.0 {
        AnomalySeverity::High
    } else if z_abs > 2.5 {
        AnomalySeverity::Medium
    } else {
        AnomalySeverity::Low
    }
}

/// Flag daily totals whose z-score against the full-period mean exceeds 2
///
/// Requires at least 3 distinct days; returns an empty list otherwise.
/// A zero standard deviation (constant dailies) also yields no flags.
pub fn detect_anomalies(dailies: &[DailyTotal]) -> Vec<SpendingAnomaly> {
    if dailies.len() < 3 {
        return Vec::new();
    }

    let totals: Vec<f64> = dailies.iter().map(|d| d.total).collect();
    let m = mean(&totals);
    let sd = population_std_dev(&totals);
    if sd == 0.0 {
        return Vec::new();
    }

    dailies
        .iter()
        .filter_map(|day| {
            let z = (day.total - m) / sd;
            if z.abs() > ANOMALY_Z_THRESHOLD {
                Some(SpendingAnomaly {
                    date: day.date,
                    total: day.total,
                    z_score: z,
                    severity: severity_for(z.abs()),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Pearson correlation coefficient over paired samples
///
/// Returns None when either side has no variance (undefined r) or when
/// fewer than 2 pairs are available.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for i in 0..n {
        sum_x += xs[i];
        sum_y += ys[i];
        sum_xy += xs[i] * ys[i];
        sum_xx += xs[i] * xs[i];
        sum_yy += ys[i] * ys[i];
    }

    let denominator =
        ((nf * sum_xx - sum_x * sum_x) * (nf * sum_yy - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some((nf * sum_xy - sum_x * sum_y) / denominator)
}

fn strength_for(r_abs: f64) -> CorrelationStrength {
    if r_abs >= 0.7 {
        CorrelationStrength::Strong
    } else if r_abs >= 0.5 {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    }
}

/// Pairwise Pearson correlation between categories' per-record amounts
///
/// Sequences are the two categories' per-transaction amount lists in
/// record order, paired positionally and truncated to the shorter list.
/// Pairing is NOT aligned by date; switching to date-aligned daily
/// totals would change every reported coefficient, so the positional
/// semantics stay. Only pairs with |r| above the 0.3 threshold are
/// reported.
pub fn category_correlations(records: &[ExpenseRecord]) -> Vec<CategoryCorrelation> {
    let mut sequences: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for record in records {
        sequences
            .entry(record.category)
            .or_default()
            .push(record.amount);
    }

    let categories: Vec<Category> = sequences.keys().copied().collect();
    let mut correlations = Vec::new();

    for (i, &first) in categories.iter().enumerate() {
        for &second in &categories[i + 1..] {
            let xs = &sequences[&first];
            let ys = &sequences[&second];
            if let Some(r) = pearson(xs, ys) {
                if r.abs() > CORRELATION_THRESHOLD {
                    correlations.push(CategoryCorrelation {
                        first,
                        second,
                        coefficient: r,
                        strength: strength_for(r.abs()),
                    });
                }
            }
        }
    }

    correlations
}

/// Heuristic one-liner explaining why a day stood out
fn day_reason(records: &[ExpenseRecord], day: &DailyTotal, kind: NotableDayKind) -> String {
    // Dominant category total for the day
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.date == day.date) {
        *by_category.entry(record.category).or_insert(0.0) += record.amount;
    }

    let dominant = by_category
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((category, total)) = dominant {
        if *total > 1000.0 {
            return format!("High-value {} expenses", category.label());
        }
    }
    if day.count > 10 {
        return "Multiple small expenses".to_string();
    }
    match kind {
        NotableDayKind::Peak => "Above-average daily spending".to_string(),
        NotableDayKind::Low => "Quiet spending day".to_string(),
    }
}

/// Rank days against the period average
///
/// Peaks: up to 5 days exceeding 1.5x the average daily total, highest
/// first. Lows: up to 5 days under 0.5x the average, lowest first.
pub fn notable_days(records: &[ExpenseRecord], dailies: &[DailyTotal]) -> Vec<NotableDay> {
    if dailies.is_empty() {
        return Vec::new();
    }

    let totals: Vec<f64> = dailies.iter().map(|d| d.total).collect();
    let average = mean(&totals);

    let mut peaks: Vec<&DailyTotal> = dailies.iter().filter(|d| d.total > 1.5 * average).collect();
    peaks.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    peaks.truncate(5);

    let mut lows: Vec<&DailyTotal> = dailies.iter().filter(|d| d.total < 0.5 * average).collect();
    lows.sort_by(|a, b| a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal));
    lows.truncate(5);

    let mut result = Vec::with_capacity(peaks.len() + lows.len());
    for day in peaks {
        result.push(NotableDay {
            date: day.date,
            total: day.total,
            count: day.count,
            kind: NotableDayKind::Peak,
            reason: day_reason(records, day, NotableDayKind::Peak),
        });
    }
    for day in lows {
        result.push(NotableDay {
            date: day.date,
            total: day.total,
            count: day.count,
            kind: NotableDayKind::Low,
            reason: day_reason(records, day, NotableDayKind::Low),
        });
    }
    result
}

/// Project spending for the next period of equal length
///
/// Total projection: average daily total x period length x (1 + slope).
/// Per-category projections nudge the category's period total by +/-10%
/// in the trend direction, unchanged when Stable.
pub fn forecast(records: &[ExpenseRecord], dailies: &[DailyTotal], period_days: i64) -> SpendingForecast {
    let totals: Vec<f64> = dailies.iter().map(|d| d.total).collect();
    let avg_daily = mean(&totals);
    let slope = trend_slope(dailies);
    let trend = classify_trend(slope);

    let projected_total = avg_daily * period_days as f64 * (1.0 + slope);

    let adjustment = match trend {
        TrendDirection::Increasing => 1.1,
        TrendDirection::Decreasing => 0.9,
        TrendDirection::Stable => 1.0,
    };

    let by_category = category_totals(records)
        .into_iter()
        .map(|cat| CategoryForecast {
            category: cat.category,
            projected: cat.total * adjustment,
        })
        .collect();

    SpendingForecast {
        period_days,
        projected_total,
        trend,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SyncStatus;
    use chrono::Utc;

    fn record(date: &str, amount: f64, category: Category) -> ExpenseRecord {
        ExpenseRecord {
            id: 0,
            title: "test".to_string(),
            amount,
            category,
            notes: None,
            receipt_ref: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            sync_status: SyncStatus::Pending,
            server_id: None,
            version: 1,
            created_at: Utc::now(),
        }
    }

    fn daily(date: &str, total: f64) -> DailyTotal {
        DailyTotal {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total,
            count: 1,
        }
    }

    #[test]
    fn test_daily_totals_groups_and_sorts() {
        let records = vec![
            record("2026-08-02", 20.0, Category::Food),
            record("2026-08-01", 10.0, Category::Food),
            record("2026-08-02", 5.0, Category::Travel),
        ];

        let dailies = daily_totals(&records);
        assert_eq!(dailies.len(), 2);
        assert_eq!(dailies[0].date.to_string(), "2026-08-01");
        assert!((dailies[0].total - 10.0).abs() < 1e-9);
        assert_eq!(dailies[1].count, 2);
        assert!((dailies[1].total - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_partition_consistency() {
        let records = vec![
            record("2026-08-01", 12.5, Category::Food),
            record("2026-08-01", 7.5, Category::Staff),
            record("2026-08-02", 30.0, Category::Travel),
            record("2026-08-03", 50.0, Category::Utility),
        ];

        let total: f64 = records.iter().map(|r| r.amount).sum();
        let daily_sum: f64 = daily_totals(&records).iter().map(|d| d.total).sum();
        let category_sum: f64 = category_totals(&records).iter().map(|c| c.total).sum();

        assert!((daily_sum - total).abs() < 1e-9);
        assert!((category_sum - total).abs() < 1e-9);
    }

    #[test]
    fn test_category_shares_sum_to_hundred() {
        let records = vec![
            record("2026-08-01", 25.0, Category::Food),
            record("2026-08-01", 25.0, Category::Staff),
            record("2026-08-02", 50.0, Category::Travel),
        ];

        let shares: f64 = category_totals(&records).iter().map(|c| c.percentage).sum();
        assert!((shares - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_increasing_sequence() {
        let dailies: Vec<DailyTotal> = (1..=7)
            .map(|d| daily(&format!("2026-08-{:02}", d), d as f64 * 10.0))
            .collect();

        let slope = trend_slope(&dailies);
        assert!(slope > TREND_THRESHOLD);
        assert_eq!(classify_trend(slope), TrendDirection::Increasing);
    }

    #[test]
    fn test_trend_decreasing_sequence() {
        let dailies: Vec<DailyTotal> = (1..=7)
            .map(|d| daily(&format!("2026-08-{:02}", d), 100.0 - d as f64 * 10.0))
            .collect();

        assert_eq!(classify_trend(trend_slope(&dailies)), TrendDirection::Decreasing);
    }

    #[test]
    fn test_trend_flat_is_stable() {
        let dailies: Vec<DailyTotal> = (1..=5)
            .map(|d| daily(&format!("2026-08-{:02}", d), 50.0))
            .collect();

        let slope = trend_slope(&dailies);
        assert!((slope).abs() < 1e-9);
        assert_eq!(classify_trend(slope), TrendDirection::Stable);
    }

    #[test]
    fn test_trend_degenerate_inputs() {
        assert_eq!(classify_trend(trend_slope(&[])), TrendDirection::Stable);
        assert_eq!(
            classify_trend(trend_slope(&[daily("2026-08-01", 100.0)])),
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_trend_threshold_boundaries() {
        assert_eq!(classify_trend(0.1), TrendDirection::Stable);
        assert_eq!(classify_trend(0.11), TrendDirection::Increasing);
        assert_eq!(classify_trend(-0.1), TrendDirection::Stable);
        assert_eq!(classify_trend(-0.11), TrendDirection::Decreasing);
    }

    #[test]
    fn test_volatility_degenerate() {
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[daily("2026-08-01", 500.0)]), 0.0);
    }

    #[test]
    fn test_volatility_constant_sequence_is_zero() {
        let dailies: Vec<DailyTotal> = (1..=10)
            .map(|d| daily(&format!("2026-08-{:02}", d), 42.0))
            .collect();
        assert_eq!(volatility(&dailies), 0.0);
    }

    #[test]
    fn test_volatility_known_value() {
        // {100, 100, 500}: mean 233.33, population stddev ~188.56
        let dailies = vec![
            daily("2026-08-03", 100.0),
            daily("2026-08-04", 100.0),
            daily("2026-08-05", 500.0),
        ];
        assert!((volatility(&dailies) - 188.561808).abs() < 1e-3);
    }

    #[test]
    fn test_no_anomalies_under_three_days() {
        let dailies = vec![daily("2026-08-01", 10.0), daily("2026-08-02", 10_000.0)];
        assert!(detect_anomalies(&dailies).is_empty());
    }

    #[test]
    fn test_no_anomalies_constant_dailies() {
        let dailies: Vec<DailyTotal> = (1..=5)
            .map(|d| daily(&format!("2026-08-{:02}", d), 100.0))
            .collect();
        assert!(detect_anomalies(&dailies).is_empty());
    }

    #[test]
    fn test_three_day_outlier_below_threshold() {
        // The Wed z-score is ~1.41 with only three points: with n=3 the
        // outlier drags the mean and stddev enough that it never crosses
        // the |z| > 2 gate.
        let dailies = vec![
            daily("2026-08-03", 100.0),
            daily("2026-08-04", 100.0),
            daily("2026-08-05", 500.0),
        ];
        assert!(detect_anomalies(&dailies).is_empty());
    }

    #[test]
    fn test_anomaly_detected_with_enough_baseline() {
        let mut dailies: Vec<DailyTotal> = (1..=20)
            .map(|d| daily(&format!("2026-08-{:02}", d), 100.0 + (d % 3) as f64))
            .collect();
        dailies.push(daily("2026-08-21", 900.0));

        let anomalies = detect_anomalies(&dailies);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date.to_string(), "2026-08-21");
        assert!(anomalies[0].z_score > ANOMALY_Z_THRESHOLD);
        assert_eq!(anomalies[0].severity, AnomalySeverity::High);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        let inverted = [40.0, 30.0, 20.0, 10.0];
        let r = pearson(&xs, &inverted).unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_zero_variance_undefined() {
        let xs = [5.0, 5.0, 5.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(pearson(&xs, &ys).is_none());
    }

    #[test]
    fn test_correlations_truncate_to_shorter_sequence() {
        // Food has 4 records, Travel 3: the pairing only covers the
        // first 3 of each, positionally. The 4th Food record would break
        // the perfect correlation if it were included.
        let records = vec![
            record("2026-08-01", 10.0, Category::Food),
            record("2026-08-01", 100.0, Category::Travel),
            record("2026-08-02", 20.0, Category::Food),
            record("2026-08-02", 200.0, Category::Travel),
            record("2026-08-03", 30.0, Category::Food),
            record("2026-08-03", 300.0, Category::Travel),
            record("2026-08-04", 5000.0, Category::Food),
        ];

        let correlations = category_correlations(&records);
        assert_eq!(correlations.len(), 1);
        assert!((correlations[0].coefficient - 1.0).abs() < 1e-9);
        assert_eq!(correlations[0].strength, CorrelationStrength::Strong);
    }

    #[test]
    fn test_weak_correlations_not_reported() {
        let records = vec![
            record("2026-08-01", 10.0, Category::Food),
            record("2026-08-01", 35.0, Category::Travel),
            record("2026-08-02", 20.0, Category::Food),
            record("2026-08-02", 5.0, Category::Travel),
            record("2026-08-03", 15.0, Category::Food),
            record("2026-08-03", 22.0, Category::Travel),
            record("2026-08-04", 18.0, Category::Food),
            record("2026-08-04", 19.0, Category::Travel),
        ];

        for correlation in category_correlations(&records) {
            assert!(correlation.coefficient.abs() > CORRELATION_THRESHOLD);
        }
    }

    #[test]
    fn test_notable_days_thresholds() {
        // Average daily total is 422: only the 1200 day crosses 1.5x
        // and only the 10 day falls under 0.5x.
        let records = vec![
            record("2026-08-01", 300.0, Category::Food),
            record("2026-08-02", 300.0, Category::Food),
            record("2026-08-03", 300.0, Category::Food),
            record("2026-08-04", 1200.0, Category::Travel),
            record("2026-08-05", 10.0, Category::Food),
        ];

        let dailies = daily_totals(&records);
        let notable = notable_days(&records, &dailies);

        let peaks: Vec<_> = notable
            .iter()
            .filter(|d| d.kind == NotableDayKind::Peak)
            .collect();
        let lows: Vec<_> = notable
            .iter()
            .filter(|d| d.kind == NotableDayKind::Low)
            .collect();

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].date.to_string(), "2026-08-04");
        assert_eq!(peaks[0].reason, "High-value Travel expenses");

        assert_eq!(lows.len(), 1);
        assert_eq!(lows[0].date.to_string(), "2026-08-05");
    }

    #[test]
    fn test_notable_day_many_small_expenses() {
        let mut records: Vec<ExpenseRecord> = (0..12)
            .map(|_| record("2026-08-04", 50.0, Category::Food))
            .collect();
        records.push(record("2026-08-01", 100.0, Category::Food));
        records.push(record("2026-08-02", 100.0, Category::Food));
        records.push(record("2026-08-03", 100.0, Category::Food));

        let dailies = daily_totals(&records);
        let notable = notable_days(&records, &dailies);
        let peak = notable
            .iter()
            .find(|d| d.kind == NotableDayKind::Peak)
            .unwrap();
        assert_eq!(peak.reason, "Multiple small expenses");
    }

    #[test]
    fn test_forecast_stable_trend() {
        let records: Vec<ExpenseRecord> = (1..=10)
            .map(|d| record(&format!("2026-08-{:02}", d), 100.0, Category::Food))
            .collect();
        let dailies = daily_totals(&records);

        let projection = forecast(&records, &dailies, 10);
        assert_eq!(projection.trend, TrendDirection::Stable);
        // avg 100/day * 10 days * (1 + 0)
        assert!((projection.projected_total - 1000.0).abs() < 1e-6);
        // Stable: category average unchanged
        assert!((projection.by_category[0].projected - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_forecast_increasing_nudges_categories_up() {
        let records: Vec<ExpenseRecord> = (1..=10)
            .map(|d| record(&format!("2026-08-{:02}", d), d as f64 * 50.0, Category::Travel))
            .collect();
        let dailies = daily_totals(&records);

        let projection = forecast(&records, &dailies, 10);
        assert_eq!(projection.trend, TrendDirection::Increasing);

        let total: f64 = records.iter().map(|r| r.amount).sum();
        assert!((projection.by_category[0].projected - total * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_forecast_empty_records() {
        let projection = forecast(&[], &[], 30);
        assert_eq!(projection.projected_total, 0.0);
        assert!(projection.by_category.is_empty());
        assert_eq!(projection.trend, TrendDirection::Stable);
    }
}
