//! Piecewise reconstruction of daily sequencer revenue, cost and profit.
//!
//! Revenue is what the sequencer collects in L2 gas fees; cost is what it
//! pays to publish the day's transaction data to L1. The cost formula
//! switches at the regime cutover: calldata pricing before, a discounted
//! blob approximation from the cutover on.
//!
//! The clamp and floor steps are data-cleaning heuristics, not physical
//! constraints. They are kept as named functions so the heuristic is
//! visible and replaceable; both pass NaN through untouched.

use crate::loader::schema::MergedRow;
use crate::utils::config::{
    BLOB_COST_DISCOUNT, BYTES_PER_TX, CALLDATA_GAS_PER_BYTE, GAS_PER_TX, GAS_PRICE_CEILING_WEI,
    WEI_PER_ETH,
};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// The L1 data-publishing fee model in force on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostRegime {
    /// Pre-cutover: batch data posted as calldata, charged per byte in L1 gas
    Calldata,
    /// Post-cutover: batch data posted as blobs, modeled as a fixed discount
    /// on the hypothetical calldata cost
    Blob,
}

impl CostRegime {
    /// Select the regime for a day. The cutover day itself is already on
    /// the blob regime.
    pub fn at(date: NaiveDate, cutover: NaiveDate) -> Self {
        if date < cutover {
            Self::Calldata
        } else {
            Self::Blob
        }
    }
}

/// One day of the merged table plus the modeled value series, in ETH
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeledRow {
    pub date: NaiveDate,
    pub tx_count: u64,
    pub avg_gas_price_l2: f64,
    pub avg_gas_price_l1: f64,
    pub active_addresses: u64,
    pub revenue_eth: f64,
    pub cost_eth: f64,
    pub profit_eth: f64,
}

/// Truncate anomalous L2 gas prices to the configured ceiling
///
/// **Public** - named data-cleaning step
///
/// Prices at or below the ceiling pass through unchanged; NaN propagates.
pub fn clamp_gas_price(price_wei: f64) -> f64 {
    if price_wei > GAS_PRICE_CEILING_WEI {
        GAS_PRICE_CEILING_WEI
    } else {
        price_wei
    }
}

/// Suppress negative modeled profit
///
/// **Public** - named presentation patch for model estimation error
///
/// NaN propagates.
pub fn floor_profit(profit_eth: f64) -> f64 {
    if profit_eth < 0.0 {
        0.0
    } else {
        profit_eth
    }
}

/// Modeled daily sequencer revenue in ETH
///
/// `tx_count * gas_per_tx * clamped_l2_price / 1e18`
pub fn daily_revenue_eth(tx_count: u64, avg_gas_price_l2: f64) -> f64 {
    let gas_used = (tx_count * GAS_PER_TX) as f64;
    gas_used * clamp_gas_price(avg_gas_price_l2) / WEI_PER_ETH
}

/// Modeled daily L1 data-publishing cost in ETH under a regime
///
/// Both regimes start from the calldata formula
/// `tx_count * bytes_per_tx * gas_per_byte * l1_price_eth`; the blob regime
/// applies the discount factor to that hypothetical cost.
pub fn daily_cost_eth(regime: CostRegime, tx_count: u64, avg_gas_price_l1: f64) -> f64 {
    let l1_price_eth = avg_gas_price_l1 / WEI_PER_ETH;
    let daily_gas = (tx_count * BYTES_PER_TX * CALLDATA_GAS_PER_BYTE) as f64;
    let calldata_cost = daily_gas * l1_price_eth;

    match regime {
        CostRegime::Calldata => calldata_cost,
        CostRegime::Blob => calldata_cost * BLOB_COST_DISCOUNT,
    }
}

/// Reconstruct the modeled value series from the merged table
///
/// **Public** - main entry point of the model
///
/// # Arguments
/// * `rows` - merged per-day table, one row per date
/// * `cutover` - first day of the blob regime
///
/// # Returns
/// One `ModeledRow` per input row, same order. Pure transformation: no
/// I/O, no mutation of the input.
pub fn reconstruct(rows: &[MergedRow], cutover: NaiveDate) -> Vec<ModeledRow> {
    debug!(
        "Reconstructing economics for {} days (cutover {})",
        rows.len(),
        cutover
    );

    rows.iter().map(|row| model_day(row, cutover)).collect()
}

/// Model a single day
///
/// **Private** - per-row derivation
fn model_day(row: &MergedRow, cutover: NaiveDate) -> ModeledRow {
    let regime = CostRegime::at(row.date, cutover);

    let revenue_eth = daily_revenue_eth(row.l2.tx_count, row.l2.avg_gas_price);
    let cost_eth = daily_cost_eth(regime, row.l2.tx_count, row.l1.avg_gas_price);
    let profit_eth = floor_profit(revenue_eth - cost_eth);

    ModeledRow {
        date: row.date,
        tx_count: row.l2.tx_count,
        avg_gas_price_l2: row.l2.avg_gas_price,
        avg_gas_price_l1: row.l1.avg_gas_price,
        active_addresses: row.l2.active_addresses,
        revenue_eth,
        cost_eth,
        profit_eth,
    }
}
