//! CSV ingest and date-key merge for the per-chain metric tables.
//!
//! Loading is strict about the merge invariant (unique date key per table)
//! and lenient about individual rows: a row that fails to parse or carries
//! a non-finite price is skipped with a warning rather than aborting the
//! run. The skipped count is reported once per file.

use crate::loader::schema::{DailyMetricRow, MergedRow};
use crate::utils::error::LoadError;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

/// Load one chain's daily metric table from a CSV file
///
/// **Public** - main entry point for ingest
///
/// # Arguments
/// * `path` - CSV file with `metric_date`, `tx_count`, `avg_gas_price`,
///   `active_addresses` columns
///
/// # Returns
/// Rows sorted by date, one per calendar day
///
/// # Errors
/// * `LoadError::Open` - file missing or unreadable (names the path)
/// * `LoadError::DuplicateDate` - date key repeated within the table
/// * `LoadError::EmptyTable` - no usable rows survived validation
pub fn load_daily_metrics(path: impl AsRef<Path>) -> Result<Vec<DailyMetricRow>, LoadError> {
    let path = path.as_ref();

    info!("Loading daily metrics from: {}", path.display());

    let file = File::open(path).map_err(|e| LoadError::Open {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    // Fail fast if the header row itself is unreadable
    reader.headers()?;

    let mut rows: Vec<DailyMetricRow> = Vec::new();
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut skipped = 0usize;

    for (idx, result) in reader.deserialize::<DailyMetricRow>().enumerate() {
        // Header occupies line 1, so the first record is line 2
        let line = idx + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("{}:{}: skipping unparseable row: {}", path.display(), line, e);
                skipped += 1;
                continue;
            }
        };

        if let Err(reason) = validate_row(&row) {
            warn!("{}:{}: skipping row: {}", path.display(), line, reason);
            skipped += 1;
            continue;
        }

        if !seen.insert(row.date) {
            return Err(LoadError::DuplicateDate {
                date: row.date,
                path: path.display().to_string(),
            });
        }

        rows.push(row);
    }

    if skipped > 0 {
        warn!("{}: skipped {} malformed rows", path.display(), skipped);
    }

    if rows.is_empty() {
        return Err(LoadError::EmptyTable(path.display().to_string()));
    }

    rows.sort_by_key(|r| r.date);

    debug!("Loaded {} days from {}", rows.len(), path.display());

    Ok(rows)
}

/// Row-level sanity checks applied before a row enters the table
///
/// **Private** - counts and prices must be usable by the model
fn validate_row(row: &DailyMetricRow) -> Result<(), String> {
    if !row.avg_gas_price.is_finite() {
        return Err(format!("non-finite avg_gas_price ({})", row.avg_gas_price));
    }
    if row.avg_gas_price < 0.0 {
        return Err(format!("negative avg_gas_price ({})", row.avg_gas_price));
    }
    Ok(())
}

/// Inner-join the L2 and L1 tables on the date key
///
/// **Public** - produces the merged table the model consumes
///
/// Dates present on only one side are dropped; the dropped counts are
/// logged at debug level. Output order follows the (sorted) L2 table.
pub fn merge_on_date(l2: Vec<DailyMetricRow>, l1: Vec<DailyMetricRow>) -> Vec<MergedRow> {
    let l2_len = l2.len();
    let l1_len = l1.len();

    let mut l1_by_date: BTreeMap<NaiveDate, DailyMetricRow> =
        l1.into_iter().map(|row| (row.date, row)).collect();

    let mut merged = Vec::with_capacity(l2_len.min(l1_len));
    for row in l2 {
        if let Some(l1_row) = l1_by_date.remove(&row.date) {
            merged.push(MergedRow {
                date: row.date,
                l2: row,
                l1: l1_row,
            });
        }
    }

    let dropped_l2 = l2_len - merged.len();
    let dropped_l1 = l1_len - merged.len();
    if dropped_l2 > 0 || dropped_l1 > 0 {
        debug!(
            "Inner join dropped {} L2-only and {} L1-only dates",
            dropped_l2, dropped_l1
        );
    }

    merged
}

/// Restrict the merged table to an inclusive date window
///
/// **Public** - the analysis window is applied before modeling
pub fn filter_window(rows: Vec<MergedRow>, from: NaiveDate, to: NaiveDate) -> Vec<MergedRow> {
    let before = rows.len();
    let filtered: Vec<MergedRow> = rows
        .into_iter()
        .filter(|row| row.date >= from && row.date <= to)
        .collect();

    debug!(
        "Window {} ..= {} kept {} of {} merged days",
        from,
        to,
        filtered.len(),
        before
    );

    filtered
}
