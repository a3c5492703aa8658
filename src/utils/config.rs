//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Average gas consumed per L2 transaction (execution + per-tx calldata charge)
pub const GAS_PER_TX: u64 = 300_000;

/// Estimated average compressed bytes per L2 transaction, including batch overhead
pub const BYTES_PER_TX: u64 = 250;

/// Calldata cost per byte on L1, in force before the blob regime
pub const CALLDATA_GAS_PER_BYTE: u64 = 16;

/// Blob-regime cost as a fraction of the hypothetical calldata cost.
/// Real blob fees were initially near-zero; 1% is a conservative upper bound.
pub const BLOB_COST_DISCOUNT: f64 = 0.01;

/// Ceiling for the L2 average gas price, in wei (5 Gwei).
/// The warehouse exports contain unit/outlier anomalies (e.g. 200 Gwei on an
/// L2); values above the ceiling are treated as corrupted and truncated.
pub const GAS_PRICE_CEILING_WEI: f64 = 5e9;

/// Wei per unit of the native currency (18 decimals)
pub const WEI_PER_ETH: f64 = 1e18;

/// Default regime cutover: EIP-4844 (Dencun) activation
pub const DEFAULT_CUTOVER_DATE: &str = "2024-03-14";

// Default analysis window (H1 2024)
pub const DEFAULT_WINDOW_START: &str = "2024-01-01";
pub const DEFAULT_WINDOW_END: &str = "2024-06-30";

// Default input/output paths
pub const DEFAULT_L2_CSV: &str = "data/arbitrum_daily.csv";
pub const DEFAULT_L1_CSV: &str = "data/ethereum_daily.csv";
pub const DEFAULT_REPORT_JSON: &str = "report.json";
