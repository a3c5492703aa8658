use chrono::NaiveDate;
use sequencer_econ::loader::{filter_window, load_daily_metrics, merge_on_date};
use sequencer_econ::utils::error::LoadError;
use std::path::PathBuf;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_sorts_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "l2.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         2024-01-03,300,3000000000,30\n\
         2024-01-01,100,1000000000,10\n\
         2024-01-02,200,2000000000,20\n",
    );

    let rows = load_daily_metrics(&path).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, day(2024, 1, 1));
    assert_eq!(rows[2].date, day(2024, 1, 3));
    assert_eq!(rows[2].tx_count, 300);
}

#[test]
fn test_load_missing_file_names_the_path() {
    let result = load_daily_metrics("data/nope_daily.csv");

    match result {
        Err(LoadError::Open { path, .. }) => assert!(path.contains("nope_daily.csv")),
        other => panic!("expected Open error, got {other:?}"),
    }
}

#[test]
fn test_load_rejects_duplicate_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "dup.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         2024-01-01,100,1000000000,10\n\
         2024-01-01,150,1500000000,15\n",
    );

    let result = load_daily_metrics(&path);

    assert!(matches!(result, Err(LoadError::DuplicateDate { .. })));
}

#[test]
fn test_load_skips_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "messy.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         2024-01-01,100,1000000000,10\n\
         not-a-date,100,1000000000,10\n\
         2024-01-02,-5,1000000000,10\n\
         2024-01-03,100,NaN,10\n\
         2024-01-04,100,2000000000,10\n",
    );

    let rows = load_daily_metrics(&path).unwrap();

    // Bad date, negative count and NaN price rows are all dropped
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(2024, 1, 1), day(2024, 1, 4)]);
}

#[test]
fn test_load_all_rows_bad_is_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "bad.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         nope,100,1000000000,10\n",
    );

    let result = load_daily_metrics(&path);

    assert!(matches!(result, Err(LoadError::EmptyTable(_))));
}

#[test]
fn test_load_merge_and_window_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let l2 = write_csv(
        &dir,
        "l2.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         2024-01-01,100,1000000000,10\n\
         2024-01-02,200,2000000000,20\n\
         2024-01-03,300,3000000000,30\n",
    );
    let l1 = write_csv(
        &dir,
        "l1.csv",
        "metric_date,tx_count,avg_gas_price,active_addresses\n\
         2024-01-02,2,20000000000,2\n\
         2024-01-03,3,30000000000,3\n\
         2024-01-04,4,40000000000,4\n",
    );

    let l2_rows = load_daily_metrics(&l2).unwrap();
    let l1_rows = load_daily_metrics(&l1).unwrap();
    let merged = merge_on_date(l2_rows, l1_rows);

    // Inner join keeps only the two overlapping dates
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].date, day(2024, 1, 2));
    assert_eq!(merged[0].l2.tx_count, 200);
    assert_eq!(merged[0].l1.avg_gas_price, 20_000_000_000.0);

    let windowed = filter_window(merged, day(2024, 1, 3), day(2024, 1, 3));
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].date, day(2024, 1, 3));
}
