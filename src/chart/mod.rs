//! Stacked-area chart generation.
//!
//! This module renders the modeled cost/profit series as an SVG chart
//! with a vertical marker at the regime cutover.

pub mod generator;

// Re-export main types
pub use generator::{generate_chart, ChartConfig};
