//! Chart property definitions with defaults from chart.json
//!
//! chart.json is embedded at compile time and holds every property name,
//! kind, default value and (for enumerated properties) the valid values.
//! Defaults live in that one file; the reader below never hardcodes them.

use super::error::{Result, SankeyError};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, warn};

/// chart.json embedded at compile time
const CHART_JSON: &str = include_str!("../../chart.json");

/// Property definition from chart.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    pub description: String,
    /// For EnumeratedProperty, the valid values
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Enumerated,
}

/// Registry of all chart properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a chart.json document
    pub fn from_json(json: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json)?;

        let properties_array = json["properties"]
            .as_array()
            .ok_or_else(|| SankeyError::Config("chart.json missing 'properties' array".into()))?;

        let mut properties = HashMap::new();

        for prop in properties_array {
            let name = prop["name"]
                .as_str()
                .ok_or_else(|| SankeyError::Config("property missing 'name'".into()))?
                .to_string();

            let kind = match prop["kind"].as_str() {
                Some("StringProperty") => PropertyKind::String,
                Some("EnumeratedProperty") => PropertyKind::Enumerated,
                other => {
                    return Err(SankeyError::Config(format!(
                        "Unknown kind {:?} for property '{}'",
                        other, name
                    )))
                }
            };

            let default_value = prop["defaultValue"].as_str().unwrap_or("").to_string();
            let description = prop["description"].as_str().unwrap_or("").to_string();

            let valid_values = if kind == PropertyKind::Enumerated {
                prop["values"].as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            } else {
                None
            };

            properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value,
                    description,
                    valid_values,
                },
            );
        }

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }

    /// All property definitions, sorted by name
    pub fn definitions(&self) -> Vec<&PropertyDef> {
        let mut defs: Vec<&PropertyDef> = self.properties.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

impl PropertyDef {
    /// One help line: name, default, valid values, description
    pub fn help_line(&self) -> String {
        let values = self
            .valid_values
            .as_ref()
            .map(|v| format!(" [{}]", v.join("|")))
            .unwrap_or_default();
        format!(
            "{:<24} default: {:?}{}\n    {}",
            self.name, self.default_value, values, self.description
        )
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(CHART_JSON).unwrap_or_else(|e| {
            error!("Failed to load chart.json: {}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed chart property reader
///
/// User values (from a config file) take precedence; anything missing or
/// invalid falls back to the chart.json default.
#[derive(Debug, Default)]
pub struct ChartPropertyReader {
    user_values: HashMap<String, String>,
}

impl ChartPropertyReader {
    /// Create from user-set values. Empty values count as not set.
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values = user_values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { user_values }
    }

    /// Create from a JSON object of property name → value
    ///
    /// Strings, numbers and booleans are accepted; other values are skipped
    /// with a warning.
    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut user_values = HashMap::new();
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    warn!("Ignoring non-scalar value for property '{}': {}", key, other);
                    continue;
                }
            };
            user_values.insert(key, value_str);
        }
        Self::new(user_values)
    }

    /// Get string property (user value or default from chart.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }

        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property with validation
    ///
    /// Returns the user-set value if valid, otherwise the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Get f64 property, falling back to the default when unparseable
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        match self.user_values.get(name) {
            None => default,
            Some(value) => value.trim().parse::<f64>().unwrap_or_else(|_| {
                warn!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value, name, default
                );
                default
            }),
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            return value;
        }

        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(min);
        warn!(
            "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
            value, name, min, max, default
        );
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(pairs: &[(&str, &str)]) -> ChartPropertyReader {
        ChartPropertyReader::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_registry_loads() {
        let reg = registry();
        assert!(reg.get_property("plot.title").is_some());
        assert!(reg.get_property("output.format").is_some());
        assert!(reg.get_property("node.color.distributor").is_some());
    }

    #[test]
    fn test_registry_defaults() {
        let reg = registry();
        assert_eq!(reg.get_default("plot.width"), Some("900"));
        assert_eq!(reg.get_default("node.color.distributor"), Some("#636EFA"));
        assert_eq!(reg.get_default("node.color.retailer"), Some("#00CC96"));
        assert_eq!(reg.get_default("output.format"), Some("html"));
    }

    #[test]
    fn test_definitions_sorted_with_help() {
        let defs = registry().definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let format = defs.iter().find(|d| d.name == "output.format").unwrap();
        let help = format.help_line();
        assert!(help.starts_with("output.format"));
        assert!(help.contains("default: \"html\""));
        assert!(help.contains("[html|json|summary]"));
        assert!(help.contains("Artifact written by the command line host"));
    }

    #[test]
    fn test_enum_validation() {
        let reg = registry();
        assert!(reg.is_valid_enum_value("output.format", "json"));
        assert!(reg.is_valid_enum_value("output.format", "HTML"));
        assert!(!reg.is_valid_enum_value("output.format", "png"));
        // Non-enumerated accepts anything
        assert!(reg.is_valid_enum_value("plot.title", "anything"));
    }

    #[test]
    fn test_reader_defaults() {
        let reader = ChartPropertyReader::default();
        assert_eq!(reader.get_enum("output.format"), "html");
        assert_eq!(reader.get_f64("title.font.size"), 20.0);
        assert_eq!(reader.get_f64("font.size"), 10.0);
    }

    #[test]
    fn test_reader_user_values() {
        let reader = reader(&[("output.format", "JSON"), ("plot.width", "1200"), ("plot.title", "")]);
        assert_eq!(reader.get_enum("output.format"), "json");
        assert_eq!(reader.get_f64("plot.width"), 1200.0);
        // Empty = not set
        assert!(reader.get_string("plot.title").starts_with("Sankey Diagram"));
    }

    #[test]
    fn test_reader_invalid_values_fall_back() {
        let reader = reader(&[("output.format", "png"), ("plot.width", "wide"), ("plot.height", "5")]);
        assert_eq!(reader.get_enum("output.format"), "html");
        assert_eq!(reader.get_f64("plot.width"), 900.0);
        assert_eq!(reader.get_f64_in_range("plot.height", 100.0, 10000.0), 900.0);
    }

    #[test]
    fn test_from_json_map() {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            r#"{"plot.width": 640, "plot.title": "Scans", "nested": {"a": 1}}"#,
        )
        .unwrap();
        let reader = ChartPropertyReader::from_json_map(map);
        assert_eq!(reader.get_f64("plot.width"), 640.0);
        assert_eq!(reader.get_string("plot.title"), "Scans");
        assert_eq!(reader.get_string("nested"), "");
    }

    #[test]
    fn test_malformed_registry() {
        assert!(PropertyRegistry::from_json("{}").is_err());
        assert!(PropertyRegistry::from_json(r#"{"properties": [{"name": "x", "kind": "Bogus"}]}"#).is_err());
    }
}
