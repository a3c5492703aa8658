use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sequencer_econ::economics::{
    build_report, clamp_gas_price, daily_cost_eth, daily_revenue_eth, reconstruct, CostRegime,
};
use sequencer_econ::loader::{DailyMetricRow, MergedRow};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cutover() -> NaiveDate {
    day(2024, 3, 14)
}

fn merged(date: NaiveDate, tx_count: u64, l2_price: f64, l1_price: f64) -> MergedRow {
    MergedRow {
        date,
        l2: DailyMetricRow {
            date,
            tx_count,
            avg_gas_price: l2_price,
            active_addresses: 40_000,
        },
        l1: DailyMetricRow {
            date,
            tx_count: 1_100_000,
            avg_gas_price: l1_price,
            active_addresses: 400_000,
        },
    }
}

#[test]
fn test_worked_example_full_pipeline() {
    // One day either side of the cutover with the reference numbers:
    // revenue 60 ETH, cost 0.4 ETH pre / 0.004 ETH post
    let rows = vec![
        merged(day(2024, 2, 1), 100_000, 2e9, 1e9),
        merged(day(2024, 4, 1), 100_000, 2e9, 1e9),
    ];

    let modeled = reconstruct(&rows, cutover());

    assert!((modeled[0].revenue_eth - 60.0).abs() < 1e-9);
    assert!((modeled[0].cost_eth - 0.4).abs() < 1e-12);
    assert!((modeled[0].profit_eth - 59.6).abs() < 1e-9);

    assert!((modeled[1].revenue_eth - 60.0).abs() < 1e-9);
    assert!((modeled[1].cost_eth - 0.004).abs() < 1e-12);
}

#[test]
fn test_profit_floor_applies_when_cost_exceeds_revenue() {
    // Near-zero L2 price, very expensive L1: raw profit would be negative
    let rows = vec![merged(day(2024, 1, 10), 1_000_000, 1.0, 900e9)];

    let modeled = reconstruct(&rows, cutover());

    assert!(modeled[0].cost_eth > modeled[0].revenue_eth);
    assert_eq!(modeled[0].profit_eth, 0.0);
}

#[test]
fn test_anomalous_l2_price_is_clamped() {
    // 200 Gwei is far above anything an L2 charged in the window
    assert_eq!(clamp_gas_price(200e9), 5e9);

    let clamped = reconstruct(&[merged(day(2024, 2, 1), 100_000, 200e9, 1e9)], cutover());
    let ceiling = reconstruct(&[merged(day(2024, 2, 1), 100_000, 5e9, 1e9)], cutover());

    assert_eq!(clamped[0].revenue_eth, ceiling[0].revenue_eth);
}

#[test]
fn test_cutover_day_is_on_the_blob_regime() {
    let rows = vec![merged(cutover(), 100_000, 2e9, 1e9)];

    let modeled = reconstruct(&rows, cutover());

    let blob = daily_cost_eth(CostRegime::Blob, 100_000, 1e9);
    assert_eq!(modeled[0].cost_eth, blob);
}

#[test]
fn test_report_six_statistics() {
    // Constant inputs: three days pre, three days post
    let mut rows = Vec::new();
    for d in 11..=13 {
        rows.push(merged(day(2024, 3, d), 100_000, 2e9, 1e9));
    }
    for d in 14..=16 {
        rows.push(merged(day(2024, 3, d), 100_000, 2e9, 1e9));
    }

    let modeled = reconstruct(&rows, cutover());
    let report = build_report(&modeled, cutover(), day(2024, 3, 11), day(2024, 3, 16));

    assert_eq!(report.pre_cutover.days, 3);
    assert_eq!(report.post_cutover.days, 3);

    assert!((report.pre_cutover.mean_cost_eth.unwrap() - 0.4).abs() < 1e-12);
    assert!((report.post_cutover.mean_cost_eth.unwrap() - 0.004).abs() < 1e-12);

    // (0.004 - 0.4) / 0.4 * 100 = -99
    assert!((report.cost_reduction_pct.unwrap() + 99.0).abs() < 1e-9);

    // margin = (60 - cost) / 60 * 100
    let pre_margin = (60.0 - 0.4) / 60.0 * 100.0;
    let post_margin = (60.0 - 0.004) / 60.0 * 100.0;
    assert!((report.pre_cutover.margin_pct.unwrap() - pre_margin).abs() < 1e-9);
    assert!((report.post_cutover.margin_pct.unwrap() - post_margin).abs() < 1e-9);
    assert!(
        (report.margin_change_pct.unwrap() - (post_margin - pre_margin)).abs() < 1e-9
    );
}

#[test]
fn test_report_with_all_days_on_one_side() {
    let rows = vec![
        merged(day(2024, 4, 1), 100_000, 2e9, 1e9),
        merged(day(2024, 4, 2), 100_000, 2e9, 1e9),
    ];

    let modeled = reconstruct(&rows, cutover());
    let report = build_report(&modeled, cutover(), day(2024, 4, 1), day(2024, 4, 2));

    assert_eq!(report.pre_cutover.days, 0);
    assert_eq!(report.pre_cutover.mean_cost_eth, None);
    assert_eq!(report.pre_cutover.margin_pct, None);
    assert_eq!(report.cost_reduction_pct, None);
    assert_eq!(report.margin_change_pct, None);
}

#[test]
fn test_correlation_tracks_shared_price_movement() {
    // L1 price doubles day over day and the L2 price follows it
    let rows = vec![
        merged(day(2024, 1, 1), 100_000, 1e9, 10e9),
        merged(day(2024, 1, 2), 100_000, 2e9, 20e9),
        merged(day(2024, 1, 3), 100_000, 4e9, 40e9),
    ];

    let modeled = reconstruct(&rows, cutover());
    let report = build_report(&modeled, cutover(), day(2024, 1, 1), day(2024, 1, 3));

    assert!((report.gas_price_correlation.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_revenue_scales_linearly_with_tx_count() {
    let base = daily_revenue_eth(50_000, 2e9);
    let double = daily_revenue_eth(100_000, 2e9);
    assert!((double - 2.0 * base).abs() < 1e-9);
}
