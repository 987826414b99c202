//! Chart configuration
//!
//! Configuration is resolved from chart properties (defined in chart.json).
//! All default values come from chart.json; a user config file only
//! overrides what it names.

use crate::sankey::chart_properties::ChartPropertyReader;
use crate::sankey::colors::{FlowPalette, NodePalette};
use crate::sankey::error::{Result, SankeyError};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Valid pixel range for figure dimensions
const MIN_DIMENSION: f64 = 100.0;
const MAX_DIMENSION: f64 = 10_000.0;

/// Artifact the command line host writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Standalone page rendering the figure with plotly.js
    #[default]
    Html,
    /// The plotly figure as JSON
    Json,
    /// Plain text node list and per-link hover text
    Summary,
}

impl OutputFormat {
    /// Parse from string value
    ///
    /// Validation happens in ChartPropertyReader.get_enum(); anything
    /// unrecognized here is treated as html.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "summary" => Self::Summary,
            _ => Self::Html,
        }
    }

    /// File name used when no output path is given
    pub fn default_file_name(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("sankey.html"),
            Self::Json => Some("sankey.json"),
            Self::Summary => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Summary => "summary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Title text above the diagram
    pub title: String,

    /// Figure width in pixels
    pub width: u32,

    /// Figure height in pixels
    pub height: u32,

    /// Title font size
    pub title_font_size: f64,

    /// Base font size (node labels, legend)
    pub font_size: f64,

    /// Node fill colors per role
    pub node_palette: NodePalette,

    /// Link colors per flag
    pub flow_palette: FlowPalette,

    /// Default artifact for the command line host
    pub output_format: OutputFormat,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_properties(&ChartPropertyReader::default())
    }
}

impl ChartConfig {
    /// Create config from chart properties
    ///
    /// All default values come from chart.json via ChartPropertyReader.
    pub fn from_properties(props: &ChartPropertyReader) -> Self {
        let title = props.get_string("plot.title");

        // Dimensions: out-of-range or unparseable values fall back to defaults
        let width = props.get_f64_in_range("plot.width", MIN_DIMENSION, MAX_DIMENSION) as u32;
        let height = props.get_f64_in_range("plot.height", MIN_DIMENSION, MAX_DIMENSION) as u32;

        let title_font_size = props.get_f64_in_range("title.font.size", 1.0, 200.0);
        let font_size = props.get_f64_in_range("font.size", 1.0, 200.0);

        // Node colors: invalid hex falls back to the default hue
        let node_palette = NodePalette::from_hex(
            &props.get_string("node.color.distributor"),
            &props.get_string("node.color.retailer"),
        );

        let output_format = OutputFormat::parse(&props.get_enum("output.format"));

        Self {
            title,
            width,
            height,
            title_font_size,
            font_size,
            node_palette,
            // Flow colors are not properties
            flow_palette: FlowPalette::default(),
            output_format,
        }
    }

    /// Load config from a JSON object file of property name → value
    ///
    /// # Errors
    /// `SankeyError::Io` if the file cannot be read, `SankeyError::Config` if
    /// it is not a JSON object.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_json = std::fs::read_to_string(path)?;

        let value: serde_json::Value = serde_json::from_str(&config_json)?;
        let serde_json::Value::Object(map) = value else {
            return Err(SankeyError::Config(format!(
                "{} must contain a JSON object of property values",
                path.display()
            )));
        };

        debug!(path = %path.display(), properties = map.len(), "Loaded chart config");
        Ok(Self::from_properties(&ChartPropertyReader::from_json_map(map)))
    }

    /// Replace the title (command line override)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
