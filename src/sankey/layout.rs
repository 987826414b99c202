//! Static node layout
//!
//! Distributors stack in a left column (x = 0.1), retailers in a right column
//! (x = 0.9). Within a column of n nodes, node i sits at `i / (n + 1)` plus a
//! per-column offset. There is no collision resolution.

use super::colors::{NodePalette, Rgba};
use std::collections::HashSet;

/// x of the distributor column
pub const DISTRIBUTOR_X: f64 = 0.1;
/// x of the retailer column
pub const RETAILER_X: f64 = 0.9;
/// Vertical offset of the distributor column
pub const BASE_SPACING: f64 = 0.05;
/// Extra vertical offset of the retailer column, on top of `BASE_SPACING`
pub const RETAILER_EXTRA_SPACING: f64 = 0.01;

/// Which column a node is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Source column
    Distributor,
    /// Sink column
    Retailer,
}

impl NodeRole {
    pub fn x(self) -> f64 {
        match self {
            NodeRole::Distributor => DISTRIBUTOR_X,
            NodeRole::Retailer => RETAILER_X,
        }
    }

    /// Offset added after `BASE_SPACING`
    fn extra_spacing(self) -> f64 {
        match self {
            NodeRole::Distributor => 0.0,
            NodeRole::Retailer => RETAILER_EXTRA_SPACING,
        }
    }

    pub fn color(self, palette: &NodePalette) -> Rgba {
        match self {
            NodeRole::Distributor => palette.distributor,
            NodeRole::Retailer => palette.retailer,
        }
    }
}

/// A positioned, colored node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub role: NodeRole,
    pub x: f64,
    pub y: f64,
    pub color: Rgba,
}

/// Distinct values in first-appearance order
pub fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// y positions for a column of `n` nodes
pub fn column_y(n: usize, role: NodeRole) -> Vec<f64> {
    let step = 1.0 / (n as f64 + 1.0);
    (0..n)
        .map(|i| i as f64 * step + BASE_SPACING + role.extra_spacing())
        .collect()
}

fn column(labels: &[String], role: NodeRole, palette: &NodePalette) -> Vec<Node> {
    labels
        .iter()
        .zip(column_y(labels.len(), role))
        .map(|(label, y)| Node {
            label: label.clone(),
            role,
            x: role.x(),
            y,
            color: role.color(palette),
        })
        .collect()
}

/// Lay out both columns
///
/// Distributor nodes come first, then retailer nodes, each in the given order.
/// A name present in both lists yields two nodes.
pub fn assign(distributors: &[String], retailers: &[String], palette: &NodePalette) -> Vec<Node> {
    let mut nodes = column(distributors, NodeRole::Distributor, palette);
    nodes.extend(column(retailers, NodeRole::Retailer, palette));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sankey::colors::{DEFAULT_DISTRIBUTOR_COLOR, DEFAULT_RETAILER_COLOR};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_distinct_in_order() {
        let values = ["TX", "CA", "TX", "NV", "CA"];
        assert_eq!(distinct_in_order(values), names(&["TX", "CA", "NV"]));
        assert!(distinct_in_order(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_x_by_role() {
        let nodes = assign(
            &names(&["CA", "TX", "NY"]),
            &names(&["NV", "CA"]),
            &NodePalette::default(),
        );

        for node in &nodes {
            match node.role {
                NodeRole::Distributor => assert_eq!(node.x, 0.1),
                NodeRole::Retailer => assert_eq!(node.x, 0.9),
            }
        }
    }

    #[test]
    fn test_distributor_y_sequence() {
        let distributors = names(&["A", "B", "C", "D"]);
        let nodes = assign(&distributors, &[], &NodePalette::default());

        let ys: Vec<f64> = nodes.iter().map(|n| n.y).collect();
        let expected: Vec<f64> = (0..4).map(|i| i as f64 * (1.0 / 5.0) + 0.05).collect();
        assert_eq!(ys, expected);
        assert_eq!(ys[0], 0.05);
    }

    #[test]
    fn test_retailer_y_offset() {
        let ys = column_y(3, NodeRole::Retailer);
        assert_eq!(ys.len(), 3);
        assert!((ys[0] - 0.06).abs() < 1e-12);
        assert!((ys[1] - (0.25 + 0.06)).abs() < 1e-12);
        assert!((ys[2] - (0.5 + 0.06)).abs() < 1e-12);
    }

    #[test]
    fn test_same_name_in_both_columns() {
        let nodes = assign(&names(&["CA"]), &names(&["CA", "NV"]), &NodePalette::default());

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].label, "CA");
        assert_eq!(nodes[0].role, NodeRole::Distributor);
        assert_eq!(nodes[0].color, DEFAULT_DISTRIBUTOR_COLOR);
        assert_eq!(nodes[1].label, "CA");
        assert_eq!(nodes[1].role, NodeRole::Retailer);
        assert_eq!(nodes[1].color, DEFAULT_RETAILER_COLOR);
    }

    #[test]
    fn test_empty_columns() {
        assert!(assign(&[], &[], &NodePalette::default()).is_empty());
        assert!(column_y(0, NodeRole::Distributor).is_empty());
    }
}
