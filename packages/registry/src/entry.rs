//! Registry entries and the inspector schema of each block type

use bricks_model::{PropValue, Props};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Palette group a block type is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Layout,
    Media,
    Advanced,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Basic => "Basic",
            Category::Layout => "Layout",
            Category::Media => "Media",
            Category::Advanced => "Advanced",
        };
        write!(f, "{}", name)
    }
}

/// Which editor widget the properties panel shows for a prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorKind {
    Text,
    Number,
    Boolean,
    Select,
    Color,
}

/// One choice of a `Select` prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Editable prop of a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSchema {
    pub key: String,
    pub label: String,
    pub kind: EditorKind,
    pub default: PropValue,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl PropSchema {
    fn new(key: &str, label: &str, kind: EditorKind, default: PropValue) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            default,
            options: Vec::new(),
        }
    }

    pub fn text(key: &str, label: &str, default: &str) -> Self {
        Self::new(key, label, EditorKind::Text, PropValue::from(default))
    }

    pub fn number(key: &str, label: &str, default: f64) -> Self {
        Self::new(key, label, EditorKind::Number, PropValue::from(default))
    }

    pub fn boolean(key: &str, label: &str, default: bool) -> Self {
        Self::new(key, label, EditorKind::Boolean, PropValue::from(default))
    }

    pub fn color(key: &str, label: &str, default: &str) -> Self {
        Self::new(key, label, EditorKind::Color, PropValue::from(default))
    }

    /// Single-select prop; `options` are `(value, label)` pairs
    pub fn select(key: &str, label: &str, default: &str, options: &[(&str, &str)]) -> Self {
        let mut schema = Self::new(key, label, EditorKind::Select, PropValue::from(default));
        schema.options = options
            .iter()
            .map(|(value, label)| SelectOption::new(*value, *label))
            .collect();
        schema
    }
}

/// Static descriptor of one block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub type_key: String,
    pub display_label: String,
    pub category: Category,
    pub props_schema: Vec<PropSchema>,

    /// Whether nodes of this type may hold children
    #[serde(default)]
    pub accepts_children: bool,
}

impl RegistryEntry {
    /// Props record built from the schema defaults
    pub fn default_props(&self) -> Props {
        self.props_schema
            .iter()
            .map(|schema| (schema.key.clone(), schema.default.clone()))
            .collect()
    }

    pub fn schema_for(&self, key: &str) -> Option<&PropSchema> {
        self.props_schema.iter().find(|schema| schema.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props_follow_schema() {
        let entry = RegistryEntry {
            type_key: "button".to_string(),
            display_label: "Button".to_string(),
            category: Category::Basic,
            props_schema: vec![
                PropSchema::text("label", "Label", "Click"),
                PropSchema::boolean("newTab", "Open in new tab", false),
            ],
            accepts_children: false,
        };

        let props = entry.default_props();
        assert_eq!(props.get("label"), Some(&PropValue::from("Click")));
        assert_eq!(props.get("newTab"), Some(&PropValue::from(false)));
        assert_eq!(entry.schema_for("newTab").map(|s| s.kind), Some(EditorKind::Boolean));
        assert!(entry.schema_for("missing").is_none());
    }

    #[test]
    fn test_select_schema_serializes_options() {
        let options = [("left", "Left"), ("center", "Center")];
        let schema = PropSchema::select("align", "Alignment", "left", &options);
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(json["kind"], "select");
        assert_eq!(json["options"][1]["value"], "center");
        assert_eq!(json["default"], "left");
    }

    #[test]
    fn test_categories_order_as_palette() {
        assert!(Category::Basic < Category::Layout);
        assert!(Category::Media < Category::Advanced);
    }
}
