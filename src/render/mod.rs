//! Rendering surfaces
//!
//! Turns a `Diagram` into the artifact the host displays.
//!
//! Structure:
//! - `figure.rs`: plotly figure (sankey trace + legend traces + layout)
//! - `html.rs`: standalone page driving plotly.js
//! - `summary`: plain text node list and link tooltips (below)

pub mod figure;
pub mod html;

use crate::config::OutputFormat;
use crate::sankey::diagram::Diagram;
use crate::sankey::error::Result;
use crate::sankey::layout::NodeRole;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub use figure::{to_figure, to_json, Figure};
pub use html::render_page;

/// Plain text rendering: title, node columns, then one tooltip per link
pub fn render_summary(diagram: &Diagram) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", diagram.title);
    let _ = writeln!(
        out,
        "Nodes: {} distributor(s), {} retailer(s); flows: {}",
        diagram.count_role(NodeRole::Distributor),
        diagram.count_role(NodeRole::Retailer),
        diagram.flows.len()
    );

    for node in &diagram.nodes {
        let role = match node.role {
            NodeRole::Distributor => "distributor",
            NodeRole::Retailer => "retailer",
        };
        let _ = writeln!(
            out,
            "  [{}] {} at ({:.2}, {:.4}) {}",
            role, node.label, node.x, node.y, node.color
        );
    }

    for flow in &diagram.flows {
        let _ = writeln!(out, "{}", flow.hover_text(&diagram.nodes));
    }
    out
}

/// Render a diagram in the given format
pub fn render(diagram: &Diagram, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => render_page(diagram),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&to_figure(diagram))?),
        OutputFormat::Summary => Ok(render_summary(diagram)),
    }
}

/// Render and write the artifact to `path`
pub fn write_artifact(diagram: &Diagram, format: OutputFormat, path: &Path) -> Result<()> {
    let content = render(diagram, format)?;
    std::fs::write(path, &content)?;
    info!(
        "Wrote {} artifact to {} ({} bytes)",
        format,
        path.display(),
        content.len()
    );
    Ok(())
}
