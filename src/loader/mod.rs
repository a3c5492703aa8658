//! Loading and merging of the per-chain daily metric tables.
//!
//! This module handles:
//! - Reading the warehouse CSV exports
//! - Row-level validation
//! - Inner-joining L2 and L1 tables on the date key
//! - Restricting to the analysis window

pub mod ingest;
pub mod schema;

// Re-export main types and functions
pub use ingest::{filter_window, load_daily_metrics, merge_on_date};
pub use schema::{DailyMetricRow, MergedRow};
