//! CSV export of the modeled daily series.
//!
//! The export is the flat "final CSV" of a run: the merged inputs plus the
//! modeled revenue/cost/profit columns, one row per day.

use crate::economics::model::ModeledRow;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::path::Path;

/// Write the modeled series as a CSV file
///
/// **Public** - main entry point for CSV export
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::CsvFailed` - serialization error
/// * `OutputError::InvalidPath` - path cannot be created or is invalid
pub fn write_modeled_csv(
    rows: &[ModeledRow],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} modeled rows to: {}",
        rows.len(),
        output_path.display()
    );

    super::prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = csv::Writer::from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}
