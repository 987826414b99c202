//! CSV upload loading
//!
//! Reads the uploaded bytes into a polars DataFrame with every column typed
//! as `String`. Numeric coercion happens later in the cleaner, so a stray
//! `"abc"` in the scans column never fails the whole load.

use super::error::{Result, SankeyError};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Column holding the origin state of a scan
pub const DISTRIBUTOR_COL: &str = "distributor_state";
/// Column holding the destination state of a scan
pub const RETAILER_COL: &str = "retailer_state";
/// Column holding the scan count
pub const SCANS_COL: &str = "scans";
/// Column holding the same-state / cross-state label
pub const FLAG_COL: &str = "flag";

/// Columns that must be present in the header, matched by name
pub const REQUIRED_COLUMNS: [&str; 4] = [DISTRIBUTOR_COL, RETAILER_COL, SCANS_COL, FLAG_COL];

/// Parse CSV bytes into a string-typed DataFrame
///
/// The header row is required. Column order is free and extra columns are
/// kept (the cleaner ignores them).
///
/// # Errors
/// - `SankeyError::Load` if the input is empty or not delimited text
/// - `SankeyError::MissingColumn` for the first required column not in the header
pub fn load_csv(bytes: &[u8]) -> Result<DataFrame> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(SankeyError::Load("no columns to parse from input".into()));
    }

    // Schema inference length 0 reads every column as String
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| SankeyError::Load(format!("Failed to parse CSV: {}", e)))?;

    for name in REQUIRED_COLUMNS {
        if df.get_column_index(name).is_none() {
            return Err(SankeyError::MissingColumn(name.to_string()));
        }
    }

    debug!(rows = df.height(), columns = df.width(), "Loaded CSV upload");
    Ok(df)
}

/// Read a CSV file from disk and parse it with [`load_csv`]
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<DataFrame> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "Read upload");
    load_csv(&bytes)
}
