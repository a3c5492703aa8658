//! Row schemas for the per-chain metric tables.
//!
//! The warehouse exports one flat CSV per (chain, time grain) with the
//! columns `metric_date` (daily) or `metric_hour` (hourly), `tx_count`,
//! `avg_gas_price` and `active_addresses`. The date key is typed as a
//! calendar day; hourly keys are collapsed to their day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// One day of metrics for a single chain
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyMetricRow {
    /// Calendar day the metrics were aggregated over
    #[serde(
        rename = "metric_date",
        alias = "metric_hour",
        deserialize_with = "de_metric_date"
    )]
    pub date: NaiveDate,

    /// Number of transactions on that day
    pub tx_count: u64,

    /// Average gas price in wei
    pub avg_gas_price: f64,

    /// Distinct sender addresses on that day
    pub active_addresses: u64,
}

/// An L2 day joined with its L1 day on the date key
///
/// Invariant: `l2.date == l1.date == date`. Dates missing on either side
/// are dropped by the inner join in [`crate::loader::merge_on_date`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub l2: DailyMetricRow,
    pub l1: DailyMetricRow,
}

/// Parse the date key, accepting a plain date or a timestamp
///
/// **Private** - serde helper for `DailyMetricRow::date`
fn de_metric_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(serde::de::Error::custom(format!(
        "unrecognized date key '{s}' (expected YYYY-MM-DD or a timestamp)"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_row(csv_data: &str) -> Result<DailyMetricRow, csv::Error> {
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        reader.deserialize().next().expect("one record")
    }

    #[test]
    fn test_parse_daily_row() {
        let row = parse_row(
            "metric_date,tx_count,avg_gas_price,active_addresses\n\
             2024-01-15,1200000,120000000.5,350000\n",
        )
        .unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(row.tx_count, 1_200_000);
        assert_eq!(row.avg_gas_price, 120_000_000.5);
        assert_eq!(row.active_addresses, 350_000);
    }

    #[test]
    fn test_parse_hourly_key_collapses_to_day() {
        let row = parse_row(
            "metric_hour,tx_count,avg_gas_price,active_addresses\n\
             2024-06-20 13:00:00,50000,2000000000,12000\n",
        )
        .unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
    }

    #[test]
    fn test_parse_bad_date_is_error() {
        let result = parse_row(
            "metric_date,tx_count,avg_gas_price,active_addresses\n\
             15/01/2024,1,1.0,1\n",
        );
        assert!(result.is_err());
    }
}
