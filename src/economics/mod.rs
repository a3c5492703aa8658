//! The sequencer economics model and its aggregate statistics.
//!
//! This module transforms the merged per-day table into:
//! - A modeled daily revenue/cost/profit series (regime-aware)
//! - Pre/post-cutover aggregate statistics and the JSON report

pub mod model;
pub mod stats;

// Re-export main types and functions
pub use model::{
    clamp_gas_price, daily_cost_eth, daily_revenue_eth, floor_profit, reconstruct, CostRegime,
    ModeledRow,
};
pub use stats::{build_report, format_summary, pearson_correlation, EconReport, RegimeStats};
