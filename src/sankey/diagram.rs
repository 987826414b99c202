//! Diagram assembly
//!
//! `build_diagram` is the pure core: records in, a renderable `Diagram` out.
//! Rendering to plotly JSON or HTML lives in `crate::render`.

use super::aggregate::aggregate;
use super::clean::Record;
use super::colors::{FlowKind, Rgba};
use super::layout::{assign, distinct_in_order, Node, NodeRole};
use crate::config::ChartConfig;
use std::collections::HashMap;
use tracing::debug;

/// Hover tooltip template understood by plotly
pub const HOVER_TEMPLATE: &str =
    "<b>%{source.label} → %{target.label}</b><br>Percentage of Scans: %{value:.2f}%<extra></extra>";

/// A directed link between a distributor node and a retailer node
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    /// Index into `Diagram::nodes` (distributor column)
    pub source: usize,
    /// Index into `Diagram::nodes` (retailer column)
    pub target: usize,
    /// Share of the source's total scans, in percent
    pub value: f64,
    pub color: Rgba,
    pub kind: FlowKind,
}

impl Flow {
    /// Plain text form of the hover tooltip
    pub fn hover_text(&self, nodes: &[Node]) -> String {
        let label = |i: usize| nodes.get(i).map(|n| n.label.as_str()).unwrap_or("?");
        format!(
            "{} → {}\nPercentage of Scans: {:.2}%",
            label(self.source),
            label(self.target),
            self.value
        )
    }
}

/// One legend swatch
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgba,
}

/// Fixed visual parameters of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    pub node_pad: f64,
    pub node_thickness: f64,
    pub node_line_color: &'static str,
    pub node_line_width: f64,
    pub hover_template: &'static str,
    pub legend_marker_size: f64,
    pub legend_marker_line_color: &'static str,
    pub legend_marker_line_width: f64,
    pub title_font_size: f64,
    pub font_size: f64,
    pub width: u32,
    pub height: u32,
    /// Uniform margin on all four sides
    pub margin: u32,
}

impl DiagramStyle {
    pub fn from_config(config: &ChartConfig) -> Self {
        DiagramStyle {
            node_pad: 30.0,
            node_thickness: 20.0,
            node_line_color: "black",
            node_line_width: 0.5,
            hover_template: HOVER_TEMPLATE,
            legend_marker_size: 10.0,
            legend_marker_line_color: "Black",
            legend_marker_line_width: 1.0,
            title_font_size: config.title_font_size,
            font_size: config.font_size,
            width: config.width,
            height: config.height,
            margin: 40,
        }
    }
}

/// Nodes, flows and legend ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub title: String,
    pub nodes: Vec<Node>,
    pub flows: Vec<Flow>,
    pub legend: Vec<LegendEntry>,
    pub style: DiagramStyle,
}

impl Diagram {
    pub fn count_role(&self, role: NodeRole) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.flows.is_empty()
    }
}

/// Build the diagram from cleaned records
///
/// Node order: distinct distributors, then distinct retailers, both in
/// first-appearance order. One flow per record.
pub fn build_diagram(records: &[Record], config: &ChartConfig) -> Diagram {
    let distributors = distinct_in_order(records.iter().map(|r| r.distributor_state.as_str()));
    let retailers = distinct_in_order(records.iter().map(|r| r.retailer_state.as_str()));

    let nodes = assign(&distributors, &retailers, &config.node_palette);

    let source_index: HashMap<&str, usize> = distributors
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let target_index: HashMap<&str, usize> = retailers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), distributors.len() + i))
        .collect();

    let flows: Vec<Flow> = aggregate(records)
        .into_iter()
        .filter_map(|weighted| {
            let record = weighted.record;
            let source = *source_index.get(record.distributor_state.as_str())?;
            let target = *target_index.get(record.retailer_state.as_str())?;
            Some(Flow {
                source,
                target,
                value: weighted.percentage,
                color: config.flow_palette.color_for(&record.flag),
                kind: record.flag,
            })
        })
        .collect();

    let legend = [FlowKind::WithinState, FlowKind::OutsideState]
        .iter()
        .map(|kind| LegendEntry {
            name: kind.label().to_string(),
            color: config.flow_palette.color_for(kind),
        })
        .collect();

    debug!(
        distributors = distributors.len(),
        retailers = retailers.len(),
        flows = flows.len(),
        "Built diagram"
    );

    Diagram {
        title: config.title.clone(),
        nodes,
        flows,
        legend,
        style: DiagramStyle::from_config(config),
    }
}
