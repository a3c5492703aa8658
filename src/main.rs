//! Sequencer Econ CLI
//!
//! Reconstructs L2 sequencer economics from warehouse CSV exports and
//! renders the stacked cost/profit chart with pre/post-cutover statistics.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sequencer_econ::chart::ChartConfig;
use sequencer_econ::commands::{execute_reconstruct, validate_args, ReconstructArgs};
use sequencer_econ::output::read_report;
use sequencer_econ::utils::config::{
    DEFAULT_CUTOVER_DATE, DEFAULT_L1_CSV, DEFAULT_L2_CSV, DEFAULT_REPORT_JSON,
    DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, SCHEMA_VERSION,
};

/// Sequencer Econ - L2 sequencer economics reconstruction
#[derive(Parser, Debug)]
#[command(name = "seq-econ")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconstruct the modeled series and write report/chart
    Reconstruct {
        /// L2 (execution layer) daily metrics CSV
        #[arg(long, default_value = DEFAULT_L2_CSV)]
        l2_csv: PathBuf,

        /// L1 (settlement layer) daily metrics CSV
        #[arg(long, default_value = DEFAULT_L1_CSV)]
        l1_csv: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = DEFAULT_REPORT_JSON)]
        output: PathBuf,

        /// Output path for the SVG chart (optional)
        #[arg(short, long)]
        chart: Option<PathBuf>,

        /// Output path for the modeled series CSV (optional)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// First day of the blob regime
        #[arg(long, default_value = DEFAULT_CUTOVER_DATE)]
        cutover: NaiveDate,

        /// Start of the analysis window (inclusive)
        #[arg(long, default_value = DEFAULT_WINDOW_START)]
        from: NaiveDate,

        /// End of the analysis window (inclusive)
        #[arg(long, default_value = DEFAULT_WINDOW_END)]
        to: NaiveDate,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Chart width in pixels
        #[arg(long, default_value = "1000")]
        width: usize,

        /// Chart height in pixels
        #[arg(long, default_value = "600")]
        height: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Reconstruct {
            l2_csv,
            l1_csv,
            output,
            chart,
            csv,
            cutover,
            from,
            to,
            title,
            width,
            height,
            summary,
        } => {
            // Create chart config when a chart was requested
            let chart_config = if chart.is_some() {
                let mut config = ChartConfig::new().with_size(width, height);

                if let Some(title_str) = title {
                    config = config.with_title(title_str);
                }

                Some(config)
            } else {
                None
            };

            let args = ReconstructArgs {
                l2_csv,
                l1_csv,
                output_json: output,
                output_svg: chart,
                output_csv: csv,
                cutover,
                window_start: from,
                window_end: to,
                chart_config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute reconstruction
            execute_reconstruct(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Window: {} ..= {}", report.window_start, report.window_end);
    println!("  Cutover: {}", report.cutover_date);
    println!("  Days modeled: {}", report.days_modeled);
    println!(
        "  Partitions: {} pre / {} post",
        report.pre_cutover.days, report.post_cutover.days
    );

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Sequencer Econ v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Reconstruction of L2 sequencer economics from L1/L2 daily metrics.");
}
