//! Scan-flow Sankey core
//!
//! Everything between the uploaded bytes and the renderable diagram.
//!
//! Structure:
//! - `data.rs`: CSV upload → string-typed DataFrame
//! - `clean.rs`: DataFrame → valid `Record`s + drop counts
//! - `aggregate.rs`: percentage of each distributor's total
//! - `layout.rs`: node positions and role colors
//! - `colors.rs`: flag → flow color, hex/rgba handling
//! - `diagram.rs`: `build_diagram`
//! - `chart_properties.rs`: chart.json defaults and typed property reading
//! - `error.rs`: Error types

pub mod aggregate;
pub mod chart_properties;
pub mod clean;
pub mod colors;
pub mod data;
pub mod diagram;
pub mod error;
pub mod layout;

// Re-exports for convenience
pub use clean::{clean, CleanReport, Cleaned, Record};
pub use colors::{FlowKind, FlowPalette, NodePalette, Rgba};
pub use data::{load_csv, load_csv_file};
pub use diagram::{build_diagram, Diagram, Flow, LegendEntry};
pub use error::{Result, SankeyError};
pub use layout::{Node, NodeRole};
