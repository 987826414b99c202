//! Upload-to-diagram pipeline
//!
//! The single forward pass shared by the command line host and the tests:
//! 1. Load the CSV upload
//! 2. Clean rows (drops are counted, not raised)
//! 3. Build the diagram (aggregate, lay out, colorize)
//!
//! Rendering is left to the caller.

use crate::config::ChartConfig;
use crate::sankey::{build_diagram, clean, load_csv, load_csv_file, CleanReport, Diagram, Result};
use polars::prelude::DataFrame;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Diagram plus the row accounting of the run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub diagram: Diagram,
    pub report: CleanReport,
}

/// Run the pipeline on uploaded CSV bytes
///
/// # Errors
/// Only load errors (unparseable input, missing required column). Malformed
/// rows are dropped and show up in `PipelineOutput::report`.
pub fn run(bytes: &[u8], config: &ChartConfig) -> Result<PipelineOutput> {
    info!("[1/3] Loading upload ({} bytes)...", bytes.len());
    let df = load_csv(bytes)?;
    run_frame(&df, config)
}

/// Read an uploaded file and run the pipeline on it
pub fn run_file(path: impl AsRef<Path>, config: &ChartConfig) -> Result<PipelineOutput> {
    info!("[1/3] Loading {}...", path.as_ref().display());
    let df = load_csv_file(path)?;
    run_frame(&df, config)
}

/// Clean and build from an already loaded upload
pub fn run_frame(df: &DataFrame, config: &ChartConfig) -> Result<PipelineOutput> {
    let t0 = Instant::now();

    info!("[2/3] Cleaning {} row(s)...", df.height());
    let cleaned = clean(df)?;

    info!("[3/3] Building diagram from {} record(s)...", cleaned.records.len());
    let diagram = build_diagram(&cleaned.records, config);

    info!(
        "Diagram ready: {} node(s), {} flow(s) [{:.3}s]",
        diagram.nodes.len(),
        diagram.flows.len(),
        t0.elapsed().as_secs_f64()
    );

    Ok(PipelineOutput {
        diagram,
        report: cleaned.report,
    })
}
