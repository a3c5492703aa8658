//! Sequencer Econ
//!
//! Reconstruction of L2 sequencer economics (revenue, L1 data cost,
//! gross profit) from per-chain daily metric tables, with a stacked-area
//! chart and pre/post-cutover statistics.
//!
//! This crate provides the core implementation for the
//! `seq-econ` CLI tool.

pub mod chart;
pub mod commands;
pub mod economics;
pub mod loader;
pub mod output;
pub mod utils;
