//! Output writers for the report, the chart and the modeled series.
//!
//! This module handles writing run artifacts to disk:
//! - JSON report (read back by the `validate` subcommand)
//! - SVG chart
//! - Modeled series CSV

pub mod csv_export;
pub mod json;
pub mod svg;

// Re-export main functions
pub use csv_export::write_modeled_csv;
pub use json::{read_report, write_report};
pub use svg::write_chart;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate an output path and create missing parent directories
///
/// **Private to the module** - shared by all writers
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
