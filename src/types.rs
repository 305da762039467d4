//! Chart data model shared by every editor component

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::constants::{geometry::MIN_CANVAS_DIMENSION, link::LABEL_ONLY};

/// Canvas size in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Raise both axes to at least MIN_CANVAS_DIMENSION
    pub fn at_least_minimum(self) -> Self {
        Self {
            width: self.width.max(MIN_CANVAS_DIMENSION),
            height: self.height.max(MIN_CANVAS_DIMENSION),
        }
    }
}

/// Canvas axis addressed by the dimension inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Position and size of a button, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    #[default]
    Normal,
    Label,
}

/// What a button points at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkedItem {
    /// Plain label, serialized as the `"label-only"` sentinel
    #[default]
    LabelOnly,
    /// Id of a reference item
    Reference(String),
}

impl LinkedItem {
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            LinkedItem::LabelOnly => None,
            LinkedItem::Reference(id) => Some(id),
        }
    }
}

impl Serialize for LinkedItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LinkedItem::LabelOnly => serializer.serialize_str(LABEL_ONLY),
            LinkedItem::Reference(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for LinkedItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == LABEL_ONLY {
            Ok(LinkedItem::LabelOnly)
        } else {
            Ok(LinkedItem::Reference(raw))
        }
    }
}

/// A positioned, styled rectangle on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub id: String,
    pub name: String,
    pub color: String,
    pub linked_item: LinkedItem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "type", default)]
    pub kind: ButtonType,
    #[serde(default)]
    pub is_font_adaptive: bool,
    pub font_size: f64,
    pub font_color: String,
    #[serde(default)]
    pub show_legend: bool,
    /// Legend entry key → replacement text
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub legend_overrides: BTreeMap<String, String>,
}

impl Button {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.x = geometry.x;
        self.y = geometry.y;
        self.width = geometry.width;
        self.height = geometry.height;
        self
    }
}

/// Partial update applied to the editing draft; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub linked_item: Option<LinkedItem>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub kind: Option<ButtonType>,
    pub is_font_adaptive: Option<bool>,
    pub font_size: Option<f64>,
    pub font_color: Option<String>,
    pub show_legend: Option<bool>,
    pub legend_overrides: Option<BTreeMap<String, String>>,
}

impl ButtonPatch {
    /// Merge onto `button`, producing the replacement value
    pub fn apply(self, button: &Button) -> Button {
        let mut next = button.clone();
        if let Some(name) = self.name {
            next.name = name;
        }
        if let Some(color) = self.color {
            next.color = color;
        }
        if let Some(linked_item) = self.linked_item {
            next.linked_item = linked_item;
        }
        if let Some(x) = self.x {
            next.x = x;
        }
        if let Some(y) = self.y {
            next.y = y;
        }
        if let Some(width) = self.width {
            next.width = width;
        }
        if let Some(height) = self.height {
            next.height = height;
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(adaptive) = self.is_font_adaptive {
            next.is_font_adaptive = adaptive;
        }
        if let Some(font_size) = self.font_size {
            next.font_size = font_size;
        }
        if let Some(font_color) = self.font_color {
            next.font_color = font_color;
        }
        if let Some(show_legend) = self.show_legend {
            next.show_legend = show_legend;
        }
        if let Some(overrides) = self.legend_overrides {
            next.legend_overrides = overrides;
        }
        next
    }
}

/// Named canvas with its buttons, as exchanged with the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub name: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Chart {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }
}

/// One canonical legend line of a reference item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub label: String,
}

impl LegendEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// External named entity a button can link to (e.g. a range)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_button() -> Button {
        Button {
            id: "b1".to_string(),
            name: "Open".to_string(),
            color: "#000000".to_string(),
            linked_item: LinkedItem::Reference("r1".to_string()),
            x: 10.0,
            y: 20.0,
            width: 120.0,
            height: 40.0,
            kind: ButtonType::Normal,
            is_font_adaptive: false,
            font_size: 14.0,
            font_color: "#FFFFFF".to_string(),
            show_legend: false,
            legend_overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn test_linked_item_label_sentinel_serialization() {
        let json = serde_json::to_string(&LinkedItem::LabelOnly).unwrap();
        assert_eq!(json, "\"label-only\"");

        let parsed: LinkedItem = serde_json::from_str("\"label-only\"").unwrap();
        assert_eq!(parsed, LinkedItem::LabelOnly);

        let parsed: LinkedItem = serde_json::from_str("\"range-7\"").unwrap();
        assert_eq!(parsed, LinkedItem::Reference("range-7".to_string()));
    }

    #[test]
    fn test_button_uses_camel_case_keys() {
        let value = serde_json::to_value(sample_button()).unwrap();
        assert_eq!(value["linkedItem"], "r1");
        assert_eq!(value["type"], "normal");
        assert_eq!(value["isFontAdaptive"], false);
        // Empty override maps are left out of the document
        assert!(value.get("legendOverrides").is_none());
    }

    #[test]
    fn test_chart_survives_json_round_trip() {
        let mut button = sample_button();
        button.legend_overrides.insert("A".to_string(), "Spade-Ace".to_string());
        let chart = Chart {
            name: "Preflop".to_string(),
            canvas_width: 800,
            canvas_height: 500,
            buttons: vec![button],
        };

        let json = serde_json::to_string(&chart).unwrap();
        assert!(json.contains("\"canvasWidth\":800"));
        let parsed: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chart);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let button = sample_button();
        let patch = ButtonPatch {
            name: Some("Fold".to_string()),
            width: Some(200.0),
            ..Default::default()
        };

        let next = patch.apply(&button);
        assert_eq!(next.name, "Fold");
        assert_eq!(next.width, 200.0);
        assert_eq!(next.x, button.x);
        assert_eq!(next.color, button.color);
        // The source value is left alone
        assert_eq!(button.name, "Open");
    }

    #[test]
    fn test_canvas_at_least_minimum() {
        let canvas = CanvasSize::new(5, 640).at_least_minimum();
        assert_eq!(canvas, CanvasSize::new(MIN_CANVAS_DIMENSION, 640));
    }
}
