//! Pre/post-cutover aggregate statistics and the JSON report.
//!
//! Every statistic that can be undefined (empty partition, zero mean
//! revenue, degenerate correlation) is an `Option` and serializes as JSON
//! `null`; the text summary prints `undefined`. Nothing here divides by
//! zero silently.

use crate::economics::model::ModeledRow;
use crate::utils::config::SCHEMA_VERSION;
use chrono::{NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Mean revenue/cost and margin over one side of the cutover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeStats {
    /// Number of modeled days in this partition
    pub days: usize,

    /// Arithmetic mean of daily modeled revenue, ETH
    pub mean_revenue_eth: Option<f64>,

    /// Arithmetic mean of daily modeled cost, ETH
    pub mean_cost_eth: Option<f64>,

    /// (mean revenue - mean cost) / mean revenue * 100
    pub margin_pct: Option<f64>,
}

impl RegimeStats {
    /// Aggregate one partition of the modeled series
    ///
    /// **Public** - also used directly by tests
    pub fn from_rows(rows: &[&ModeledRow]) -> Self {
        let days = rows.len();
        let mean_revenue_eth = mean(rows.iter().map(|r| r.revenue_eth));
        let mean_cost_eth = mean(rows.iter().map(|r| r.cost_eth));

        let margin_pct = match (mean_revenue_eth, mean_cost_eth) {
            (Some(rev), Some(cost)) if rev != 0.0 => Some((rev - cost) / rev * 100.0),
            _ => None,
        };

        Self {
            days,
            mean_revenue_eth,
            mean_cost_eth,
            margin_pct,
        }
    }
}

/// The full report written to JSON and printed as the console summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// First day of the blob regime
    pub cutover_date: NaiveDate,

    /// Inclusive analysis window
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,

    /// Total modeled days in the window
    pub days_modeled: usize,

    pub pre_cutover: RegimeStats,
    pub post_cutover: RegimeStats,

    /// (post mean cost - pre mean cost) / pre mean cost * 100
    pub cost_reduction_pct: Option<f64>,

    /// post margin - pre margin, percentage points
    pub margin_change_pct: Option<f64>,

    /// Pearson correlation of daily L2 vs L1 average gas price
    pub gas_price_correlation: Option<f64>,
}

/// Assemble the report from the modeled series
///
/// **Public** - main entry point for the reporter
///
/// # Arguments
/// * `rows` - modeled series, one row per day
/// * `cutover` - partition boundary (post side is inclusive of it)
/// * `window_start`, `window_end` - the analysis window the series was
///   restricted to, recorded for reproducibility
pub fn build_report(
    rows: &[ModeledRow],
    cutover: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> EconReport {
    let (pre, post): (Vec<&ModeledRow>, Vec<&ModeledRow>) =
        rows.iter().partition(|r| r.date < cutover);

    debug!(
        "Partitioned {} days into {} pre-cutover and {} post-cutover",
        rows.len(),
        pre.len(),
        post.len()
    );

    let pre_cutover = RegimeStats::from_rows(&pre);
    let post_cutover = RegimeStats::from_rows(&post);

    let cost_reduction_pct =
        relative_change_pct(pre_cutover.mean_cost_eth, post_cutover.mean_cost_eth);
    let margin_change_pct = match (pre_cutover.margin_pct, post_cutover.margin_pct) {
        (Some(pre_m), Some(post_m)) => Some(post_m - pre_m),
        _ => None,
    };

    let l2_prices: Vec<f64> = rows.iter().map(|r| r.avg_gas_price_l2).collect();
    let l1_prices: Vec<f64> = rows.iter().map(|r| r.avg_gas_price_l1).collect();
    let gas_price_correlation = pearson_correlation(&l2_prices, &l1_prices);

    EconReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        cutover_date: cutover,
        window_start,
        window_end,
        days_modeled: rows.len(),
        pre_cutover,
        post_cutover,
        cost_reduction_pct,
        margin_change_pct,
        gas_price_correlation,
    }
}

/// Arithmetic mean, `None` for an empty sequence
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Relative change `(new - old) / old * 100`
///
/// **Private** - `None` when either side is missing or old is zero
fn relative_change_pct(old: Option<f64>, new: Option<f64>) -> Option<f64> {
    match (old, new) {
        (Some(old), Some(new)) if old != 0.0 => Some((new - old) / old * 100.0),
        _ => None,
    }
}

/// Pearson correlation coefficient of two equal-length series
///
/// **Public** - `None` for mismatched/short input or a constant series
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some(cov / denom)
}

/// Render the report as the console summary block
///
/// **Public** - used by the reconstruct command's `--summary` flag
pub fn format_summary(report: &EconReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Window:                  {} ..= {} ({} days)",
        report.window_start, report.window_end, report.days_modeled
    ));
    lines.push(format!(
        "Cutover:                 {} ({} pre / {} post)",
        report.cutover_date, report.pre_cutover.days, report.post_cutover.days
    ));
    lines.push(format!(
        "Pre-cutover avg cost:    {}",
        fmt_eth(report.pre_cutover.mean_cost_eth)
    ));
    lines.push(format!(
        "Post-cutover avg cost:   {}",
        fmt_eth(report.post_cutover.mean_cost_eth)
    ));
    lines.push(format!(
        "Cost reduction:          {}",
        fmt_pct(report.cost_reduction_pct)
    ));
    lines.push(format!(
        "Pre-cutover margin:      {}",
        fmt_pct(report.pre_cutover.margin_pct)
    ));
    lines.push(format!(
        "Post-cutover margin:     {}",
        fmt_pct(report.post_cutover.margin_pct)
    ));
    lines.push(format!(
        "Margin change:           {}",
        fmt_pct(report.margin_change_pct)
    ));
    lines.push(format!(
        "L2/L1 price correlation: {}",
        report
            .gas_price_correlation
            .map(|c| format!("{c:.4}"))
            .unwrap_or_else(|| "undefined".to_string())
    ));

    lines.join("\n")
}

fn fmt_eth(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4} ETH"))
        .unwrap_or_else(|| "undefined".to_string())
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}%"))
        .unwrap_or_else(|| "undefined".to_string())
}
