//! GenerateBlocks element configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Styling configuration for one `gb-element-<hex>` node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateBlocksConfig {
    /// Hex id taken from the `gb-element-<hex>` class
    pub element_id: String,

    /// Element kind reported by the plugin (`container`, `text`, ...)
    #[serde(default)]
    pub element_type: String,

    /// Raw style properties keyed by camelCase name
    #[serde(default)]
    pub configuration: Map<String, Value>,

    /// CSS declarations derived from `configuration`
    #[serde(default)]
    pub styles: String,
}

/// Configuration keys with a single CSS property each.
const SIMPLE_PROPERTIES: &[(&str, &str)] = &[
    ("backgroundColor", "background-color"),
    ("textColor", "color"),
    ("borderRadius", "border-radius"),
    ("fontSize", "font-size"),
    ("fontWeight", "font-weight"),
    ("display", "display"),
    ("flexDirection", "flex-direction"),
    ("alignItems", "align-items"),
    ("justifyContent", "justify-content"),
];

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

impl GenerateBlocksConfig {
    /// Create a config, deriving `styles` from `configuration`.
    pub fn new(
        element_id: impl Into<String>,
        element_type: impl Into<String>,
        configuration: Map<String, Value>,
    ) -> Self {
        let styles = derive_css(&configuration);
        Self {
            element_id: element_id.into(),
            element_type: element_type.into(),
            configuration,
            styles,
        }
    }
}

/// Convert a style configuration into a CSS declaration string.
///
/// Unknown keys are ignored. `padding`/`margin` accept either a scalar
/// (shorthand) or a per-side object (longhands, only for sides present).
pub fn derive_css(configuration: &Map<String, Value>) -> String {
    let mut declarations = Vec::new();

    for (key, property) in SIMPLE_PROPERTIES.iter().take(2) {
        push_scalar(&mut declarations, configuration, key, property);
    }

    for box_property in ["padding", "margin"] {
        match configuration.get(box_property) {
            Some(Value::Object(sides)) => {
                for side in SIDES {
                    if let Some(value) = sides.get(side).and_then(css_value) {
                        declarations.push(format!("{box_property}-{side}: {value};"));
                    }
                }
            }
            Some(other) => {
                if let Some(value) = css_value(other) {
                    declarations.push(format!("{box_property}: {value};"));
                }
            }
            None => {}
        }
    }

    for (key, property) in SIMPLE_PROPERTIES.iter().skip(2) {
        push_scalar(&mut declarations, configuration, key, property);
    }

    declarations.join(" ")
}

fn push_scalar(out: &mut Vec<String>, configuration: &Map<String, Value>, key: &str, property: &str) {
    if let Some(value) = configuration.get(key).and_then(css_value) {
        out.push(format!("{property}: {value};"));
    }
}

fn css_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
