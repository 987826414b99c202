//! Plotly figure serialization
//!
//! Converts a `Diagram` into the plotly figure object: one `sankey` trace,
//! two marker-only `scatter` traces acting as the flag legend, and the layout.

use crate::sankey::colors::Rgba;
use crate::sankey::diagram::Diagram;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Sankey(SankeyTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyTrace {
    pub node: SankeyNodes,
    pub link: SankeyLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyNodes {
    pub pad: f64,
    pub thickness: f64,
    pub line: Line,
    pub label: Vec<String>,
    pub color: Vec<Rgba>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyLinks {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<f64>,
    pub hovertemplate: String,
    pub color: Vec<Rgba>,
}

/// Legend-only scatter: a single null point, so nothing is drawn on the plot area
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: String,
    pub marker: Marker,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: f64,
    pub color: Rgba,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub font: Font,
    pub height: u32,
    pub width: u32,
    pub margin: Margin,
    pub showlegend: bool,
}

/// Build the plotly figure for a diagram
pub fn to_figure(diagram: &Diagram) -> Figure {
    let style = &diagram.style;

    let node = SankeyNodes {
        pad: style.node_pad,
        thickness: style.node_thickness,
        line: Line {
            color: style.node_line_color.to_string(),
            width: style.node_line_width,
        },
        label: diagram.nodes.iter().map(|n| n.label.clone()).collect(),
        color: diagram.nodes.iter().map(|n| n.color).collect(),
        x: diagram.nodes.iter().map(|n| n.x).collect(),
        y: diagram.nodes.iter().map(|n| n.y).collect(),
    };

    let link = SankeyLinks {
        source: diagram.flows.iter().map(|f| f.source).collect(),
        target: diagram.flows.iter().map(|f| f.target).collect(),
        value: diagram.flows.iter().map(|f| f.value).collect(),
        hovertemplate: style.hover_template.to_string(),
        color: diagram.flows.iter().map(|f| f.color).collect(),
    };

    let mut data = vec![Trace::Sankey(SankeyTrace { node, link })];
    data.extend(diagram.legend.iter().map(|entry| {
        Trace::Scatter(ScatterTrace {
            x: vec![None],
            y: vec![None],
            mode: "markers".to_string(),
            marker: Marker {
                size: style.legend_marker_size,
                color: entry.color,
                line: Line {
                    color: style.legend_marker_line_color.to_string(),
                    width: style.legend_marker_line_width,
                },
            },
            name: entry.name.clone(),
        })
    }));

    let layout = Layout {
        title: Title {
            text: diagram.title.clone(),
            font: Font {
                size: style.title_font_size,
            },
        },
        font: Font {
            size: style.font_size,
        },
        height: style.height,
        width: style.width,
        margin: Margin {
            l: style.margin,
            r: style.margin,
            t: style.margin,
            b: style.margin,
        },
        showlegend: true,
    };

    Figure { data, layout }
}

/// Serialize the figure of a diagram to a JSON value
pub fn to_json(diagram: &Diagram) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(to_figure(diagram))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::sankey::clean::Record;
    use crate::sankey::colors::FlowKind;
    use crate::sankey::diagram::build_diagram;
    use serde_json::json;

    fn scenario_a() -> Diagram {
        let records = vec![
            Record::new("CA", "CA", 80.0, FlowKind::WithinState),
            Record::new("CA", "NV", 20.0, FlowKind::OutsideState),
        ];
        build_diagram(&records, &ChartConfig::default())
    }

    #[test]
    fn test_trace_structure() {
        let value = to_json(&scenario_a()).unwrap();
        let data = value["data"].as_array().unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["type"], "sankey");
        assert_eq!(data[1]["type"], "scatter");
        assert_eq!(data[2]["type"], "scatter");
        assert_eq!(data[1]["name"], "WITHIN SAME STATE");
        assert_eq!(data[2]["name"], "OUTSIDE STATE");
        assert_eq!(data[1]["x"], json!([null]));
        assert_eq!(data[1]["marker"]["color"], "rgba(0, 255, 0, 0.5)");
        assert_eq!(data[2]["marker"]["line"], json!({"color": "Black", "width": 1.0}));
    }

    #[test]
    fn test_sankey_nodes_and_links() {
        let value = to_json(&scenario_a()).unwrap();
        let sankey = &value["data"][0];

        assert_eq!(sankey["node"]["label"], json!(["CA", "CA", "NV"]));
        assert_eq!(sankey["node"]["color"], json!(["#636EFA", "#00CC96", "#00CC96"]));
        assert_eq!(sankey["node"]["x"], json!([0.1, 0.9, 0.9]));
        assert_eq!(sankey["node"]["pad"], 30.0);
        assert_eq!(sankey["node"]["line"]["color"], "black");

        assert_eq!(sankey["link"]["source"], json!([0, 0]));
        assert_eq!(sankey["link"]["target"], json!([1, 2]));
        assert_eq!(
            sankey["link"]["color"],
            json!(["rgba(0, 255, 0, 0.5)", "rgba(255, 0, 0, 0.5)"])
        );
        assert!(sankey["link"]["hovertemplate"]
            .as_str()
            .unwrap()
            .contains("Percentage of Scans: %{value:.2f}%"));
    }

    #[test]
    fn test_layout() {
        let value = to_json(&scenario_a()).unwrap();
        let layout = &value["layout"];

        assert_eq!(layout["width"], 900);
        assert_eq!(layout["height"], 900);
        assert_eq!(layout["showlegend"], true);
        assert_eq!(layout["title"]["font"]["size"], 20.0);
        assert_eq!(layout["margin"], json!({"l": 40, "r": 40, "t": 40, "b": 40}));
    }
}
