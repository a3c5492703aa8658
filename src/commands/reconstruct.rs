//! Reconstruct command implementation.
//!
//! The reconstruct command:
//! 1. Loads the L2 daily metric table
//! 2. Loads the L1 daily metric table
//! 3. Merges on the date key and restricts to the analysis window
//! 4. Reconstructs the modeled revenue/cost/profit series
//! 5. Builds the pre/post-cutover report (and the chart, if requested)
//! 6. Writes output files

use crate::chart::{generate_chart, ChartConfig};
use crate::economics::{build_report, format_summary, reconstruct};
use crate::loader::{filter_window, load_daily_metrics, merge_on_date};
use crate::output::{write_chart, write_modeled_csv, write_report};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the reconstruct command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReconstructArgs {
    /// L2 (execution layer) daily metrics CSV
    pub l2_csv: PathBuf,

    /// L1 (settlement layer) daily metrics CSV
    pub l1_csv: PathBuf,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Output path for the SVG chart (optional)
    pub output_svg: Option<PathBuf>,

    /// Output path for the modeled series CSV (optional)
    pub output_csv: Option<PathBuf>,

    /// First day of the blob regime
    pub cutover: NaiveDate,

    /// Inclusive analysis window
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,

    /// Chart configuration (only used when `output_svg` is set)
    pub chart_config: Option<ChartConfig>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Execute the reconstruct command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file load failures (missing file, duplicate date key)
/// * An empty merged table after windowing
/// * Chart generation and file write errors
pub fn execute_reconstruct(args: ReconstructArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting reconstruction for {} (L2) vs {} (L1)",
          args.l2_csv.display(),
          args.l1_csv.display());

    // Step 1: Load L2 table
    info!("Step 1/6: Loading L2 daily metrics...");
    let l2_rows = load_daily_metrics(&args.l2_csv)
        .context("Failed to load L2 daily metrics")?;

    // Step 2: Load L1 table
    info!("Step 2/6: Loading L1 daily metrics...");
    let l1_rows = load_daily_metrics(&args.l1_csv)
        .context("Failed to load L1 daily metrics")?;

    // Step 3: Merge and restrict to the window
    info!("Step 3/6: Merging on date key...");
    let merged = merge_on_date(l2_rows, l1_rows);
    let merged = filter_window(merged, args.window_start, args.window_end);

    if merged.is_empty() {
        anyhow::bail!(
            "no overlapping dates between the two tables in the window {} ..= {}",
            args.window_start,
            args.window_end
        );
    }

    debug!("Merged table has {} days", merged.len());

    // Step 4: Reconstruct the modeled series
    info!("Step 4/6: Reconstructing revenue/cost/profit...");
    let modeled = reconstruct(&merged, args.cutover);

    // Step 5: Aggregate statistics (and chart, if requested)
    info!("Step 5/6: Computing pre/post-cutover statistics...");
    let report = build_report(&modeled, args.cutover, args.window_start, args.window_end);

    let svg_content = if args.output_svg.is_some() {
        let config = args.chart_config.as_ref();
        let svg = generate_chart(&modeled, args.cutover, config)
            .context("Failed to generate chart")?;
        Some(svg)
    } else {
        debug!("Chart not requested, skipping generation");
        None
    };

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");

    write_report(&report, &args.output_json)
        .context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_chart(&svg, svg_path).context("Failed to write chart SVG")?;
        info!("✓ Chart written to: {}", svg_path.display());
    }

    if let Some(csv_path) = &args.output_csv {
        write_modeled_csv(&modeled, csv_path)
            .context("Failed to write modeled series CSV")?;
        info!("✓ Modeled series written to: {}", csv_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("SEQUENCER ECONOMICS SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", format_summary(&report));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Reconstruction completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate reconstruct arguments
///
/// **Public** - can be called before execute_reconstruct for early validation
pub fn validate_args(args: &ReconstructArgs) -> Result<()> {
    if args.l2_csv == args.l1_csv {
        anyhow::bail!("L2 and L1 inputs point at the same file: {}",
                      args.l2_csv.display());
    }

    if args.window_start > args.window_end {
        anyhow::bail!(
            "analysis window is inverted: {} > {}",
            args.window_start,
            args.window_end
        );
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("report output path cannot be empty");
    }

    Ok(())
}
