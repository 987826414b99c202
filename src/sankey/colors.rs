//! Flow and node colors
//!
//! This module provides:
//! - `Rgba`: a color with alpha, rendered as CSS `rgba(...)` or parsed from `#RRGGBB`
//! - `FlowKind`: the flag column resolved into a tagged category
//! - `FlowPalette`: the fixed flag → link color mapping (total, with a default)
//! - `NodePalette`: the per-role node fill colors

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Flag label for scans that stay in the distributor's state
pub const WITHIN_SAME_STATE: &str = "WITHIN SAME STATE";
/// Flag label for scans that leave the distributor's state
pub const OUTSIDE_STATE: &str = "OUTSIDE STATE";

/// Default distributor node color (plotly blue)
pub const DEFAULT_DISTRIBUTOR_COLOR: Rgba = Rgba::opaque(0x63, 0x6E, 0xFA);
/// Default retailer node color (plotly green)
pub const DEFAULT_RETAILER_COLOR: Rgba = Rgba::opaque(0x00, 0xCC, 0x96);

/// RGB color with an alpha channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    /// Parse a hex color string
    ///
    /// Supports `#RRGGBB` and `RRGGBB`. Returns None for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Rgba::opaque(r, g, b))
    }

    /// Hex form `#RRGGBB` (alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    /// Opaque colors print as hex, translucent ones as CSS `rgba(r, g, b, a)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Category of a flow, resolved once from the raw flag label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlowKind {
    /// Distributor and retailer are in the same state
    WithinState,
    /// Distributor and retailer are in different states
    OutsideState,
    /// Any other label, kept verbatim (empty when the flag was missing)
    Other(String),
}

impl FlowKind {
    /// Resolve a flag label. Matching is exact, as written in the source data.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            WITHIN_SAME_STATE => FlowKind::WithinState,
            OUTSIDE_STATE => FlowKind::OutsideState,
            other => FlowKind::Other(other.to_string()),
        }
    }

    /// Resolve an optional flag label; missing maps to `Other("")`
    pub fn from_optional_flag(flag: Option<&str>) -> Self {
        flag.map(Self::from_flag)
            .unwrap_or_else(|| FlowKind::Other(String::new()))
    }

    pub fn label(&self) -> &str {
        match self {
            FlowKind::WithinState => WITHIN_SAME_STATE,
            FlowKind::OutsideState => OUTSIDE_STATE,
            FlowKind::Other(label) => label,
        }
    }
}

/// Link colors per flow kind
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPalette {
    pub within_state: Rgba,
    pub outside_state: Rgba,
    /// Fallback for every unrecognized flag
    pub other: Rgba,
}

impl Default for FlowPalette {
    fn default() -> Self {
        FlowPalette {
            within_state: Rgba::new(0, 255, 0, 0.5),
            outside_state: Rgba::new(255, 0, 0, 0.5),
            other: Rgba::new(0, 0, 0, 0.2),
        }
    }
}

impl FlowPalette {
    pub fn color_for(&self, kind: &FlowKind) -> Rgba {
        match kind {
            FlowKind::WithinState => self.within_state,
            FlowKind::OutsideState => self.outside_state,
            FlowKind::Other(_) => self.other,
        }
    }
}

/// Node fill colors per role
#[derive(Debug, Clone, PartialEq)]
pub struct NodePalette {
    pub distributor: Rgba,
    pub retailer: Rgba,
}

impl Default for NodePalette {
    fn default() -> Self {
        NodePalette {
            distributor: DEFAULT_DISTRIBUTOR_COLOR,
            retailer: DEFAULT_RETAILER_COLOR,
        }
    }
}

impl NodePalette {
    /// Build from hex strings, falling back to the default hue for an unparseable value
    pub fn from_hex(distributor: &str, retailer: &str) -> Self {
        let parse = |hex: &str, fallback: Rgba| {
            Rgba::from_hex(hex).unwrap_or_else(|| {
                warn!(
                    "Invalid node color '{}', using default {}",
                    hex,
                    fallback.to_hex()
                );
                fallback
            })
        };

        NodePalette {
            distributor: parse(distributor, DEFAULT_DISTRIBUTOR_COLOR),
            retailer: parse(retailer, DEFAULT_RETAILER_COLOR),
        }
    }
}
