//! Scan Sankey - command line host
//!
//! Plays the upload surface (a CSV path) and the display surface (an HTML
//! page, the plotly figure JSON, or a text summary) around the library
//! pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use scan_sankey::config::{ChartConfig, OutputFormat};
use scan_sankey::sankey::chart_properties::registry;
use scan_sankey::{logger, pipeline, render};
use std::path::PathBuf;
use tracing::{info, warn};

/// Shown when no upload is given
const UPLOAD_PROMPT: &str = "Please upload a CSV file to generate the Sankey diagram.";

/// Sankey diagram of scans from distributor states to retailer states.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV with distributor_state, retailer_state, scans and flag columns
    input: Option<PathBuf>,

    /// Where to write the artifact (default: sankey.html / sankey.json; summary prints to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Artifact format (default from config, html otherwise)
    #[arg(short, long, value_parser = ["html", "json", "summary"])]
    format: Option<String>,

    /// JSON object of chart property overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Title text, overrides the config
    #[arg(long)]
    title: Option<String>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Print the chart properties a config file may set, then exit
    #[arg(long)]
    list_properties: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_tracing(cli.verbose);

    if cli.list_properties {
        for def in registry().definitions() {
            println!("{}", def.help_line());
        }
        return Ok(());
    }

    let Some(input) = cli.input.as_ref() else {
        println!("{}", UPLOAD_PROMPT);
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(title) = &cli.title {
        config = config.with_title(title.clone());
    }

    let format = cli
        .format
        .as_deref()
        .map(OutputFormat::parse)
        .unwrap_or(config.output_format);

    info!("Scan Sankey v{}", env!("CARGO_PKG_VERSION"));
    let output = pipeline::run_file(input, &config)
        .with_context(|| format!("Failed to build diagram from {}", input.display()))?;

    if output.report.dropped() > 0 {
        warn!(
            "{} of {} row(s) excluded from the diagram",
            output.report.dropped(),
            output.report.rows_read
        );
    }
    if output.diagram.is_empty() {
        warn!("No valid rows in {}, the diagram is empty", input.display());
    }

    let path = cli
        .output
        .clone()
        .or_else(|| format.default_file_name().map(PathBuf::from));

    match path {
        Some(path) => {
            render::write_artifact(&output.diagram, format, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Saved {} ({})", path.display(), format);
        }
        None => print!("{}", render::render(&output.diagram, format)?),
    }

    Ok(())
}
