//! Scan Sankey Library
//!
//! Builds a Sankey diagram of scan distribution from distributor states to
//! retailer states out of a CSV upload, and renders it as a plotly figure.

pub mod config;
pub mod logger;
pub mod pipeline;
pub mod render;
pub mod sankey;
