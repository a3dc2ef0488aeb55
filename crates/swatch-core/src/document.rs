//! Design document model.
//!
//! These types mirror the subset of a design tool's file JSON that colour
//! extraction needs: the node tree, each node's fills and style references,
//! and the file-level style table. Unknown fields are ignored and unknown
//! node or style kinds deserialize to a catch-all variant, so a newer file
//! format never fails to load because of additions.
//!
//! # Example
//!
//! ```rust
//! use swatch_core::document::{Document, NodeType};
//!
//! let file = Document::from_json(r#"{
//!     "name": "Palette",
//!     "document": {
//!         "type": "DOCUMENT",
//!         "children": [
//!             { "type": "ELLIPSE", "styles": { "fill": "1:2" },
//!               "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }] }
//!         ]
//!     },
//!     "styles": { "1:2": { "name": "Brand/Red", "styleType": "FILL" } }
//! }"#).unwrap();
//!
//! assert_eq!(file.document.kind, NodeType::Document);
//! assert_eq!(file.fill_styles().count(), 1);
//! ```

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The style slot a node uses to reference its fill style.
pub const FILL_SLOT: &str = "fill";

/// Kind of a node in the design tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Vector,
    BooleanOperation,
    Star,
    Line,
    Ellipse,
    RegularPolygon,
    Rectangle,
    Text,
    Slice,
    Component,
    ComponentSet,
    Instance,
    /// Any kind this crate does not know about.
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Parses a kind from its wire name (`"ELLIPSE"`, `"RECTANGLE"`, ...).
    ///
    /// Matching is case-insensitive; unknown names map to [`NodeType::Other`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "DOCUMENT" => NodeType::Document,
            "CANVAS" => NodeType::Canvas,
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "SECTION" => NodeType::Section,
            "VECTOR" => NodeType::Vector,
            "BOOLEAN_OPERATION" => NodeType::BooleanOperation,
            "STAR" => NodeType::Star,
            "LINE" => NodeType::Line,
            "ELLIPSE" => NodeType::Ellipse,
            "REGULAR_POLYGON" => NodeType::RegularPolygon,
            "RECTANGLE" => NodeType::Rectangle,
            "TEXT" => NodeType::Text,
            "SLICE" => NodeType::Slice,
            "COMPONENT" => NodeType::Component,
            "COMPONENT_SET" => NodeType::ComponentSet,
            "INSTANCE" => NodeType::Instance,
            _ => NodeType::Other,
        }
    }
}

/// A colour with four channels, each conceptually in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Missing alpha means fully opaque.
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl ColorValue {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque colour.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

/// One entry of a node's `fills` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paint {
    /// Paint kind (`SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Only solid paints carry a colour.
    #[serde(default)]
    pub color: Option<ColorValue>,
}

impl Paint {
    pub fn solid(color: ColorValue) -> Self {
        Self {
            kind: "SOLID".to_string(),
            color: Some(color),
        }
    }
}

/// A node in the design tree.
///
/// A node is a container when the `children` field is present, even if the
/// list is empty, and a leaf otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub children: Option<Vec<DocumentNode>>,
    #[serde(default)]
    pub fills: Option<Vec<Paint>>,
    /// Style slot (`fill`, `stroke`, `text`, ...) to style id.
    #[serde(default)]
    pub styles: Option<BTreeMap<String, String>>,
}

impl DocumentNode {
    /// Creates a leaf node of the given kind with no fills and no styles.
    pub fn leaf(kind: NodeType) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind,
            children: None,
            fills: None,
            styles: None,
        }
    }

    /// Creates a container node holding `children` in document order.
    pub fn container(kind: NodeType, children: Vec<DocumentNode>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(kind)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Appends a solid fill.
    pub fn with_fill(mut self, color: ColorValue) -> Self {
        self.fills.get_or_insert_with(Vec::new).push(Paint::solid(color));
        self
    }

    /// References `style_id` from the given style slot.
    pub fn with_style(mut self, slot: impl Into<String>, style_id: impl Into<String>) -> Self {
        self.styles
            .get_or_insert_with(BTreeMap::new)
            .insert(slot.into(), style_id.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The style id referenced from the `fill` slot, if any.
    pub fn fill_style(&self) -> Option<&str> {
        self.styles
            .as_ref()
            .and_then(|styles| styles.get(FILL_SLOT))
            .map(String::as_str)
    }

    /// Colour of the first fill, when that fill has one.
    pub fn first_fill_color(&self) -> Option<ColorValue> {
        self.fills
            .as_ref()
            .and_then(|fills| fills.first())
            .and_then(|paint| paint.color)
    }
}

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleType {
    Fill,
    Text,
    Effect,
    Grid,
    #[serde(other)]
    Other,
}

/// An entry of the file-level style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDefinition {
    pub id: String,
    pub name: String,
    pub style_type: StyleType,
}

impl StyleDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style_type,
        }
    }

    /// Shorthand for a `FILL` definition.
    pub fn fill(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, StyleType::Fill)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStyle {
    #[serde(default)]
    name: String,
    style_type: StyleType,
}

/// A whole design file: the root node plus the style table in file order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    pub document: DocumentNode,
    #[serde(default, deserialize_with = "deserialize_styles")]
    pub styles: Vec<StyleDefinition>,
}

impl Document {
    pub fn new(document: DocumentNode, styles: Vec<StyleDefinition>) -> Self {
        Self {
            name: String::new(),
            document,
            styles,
        }
    }

    /// Parses a design file from its JSON representation.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Style definitions of type `FILL`, in style-table order.
    pub fn fill_styles(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles
            .iter()
            .filter(|style| style.style_type == StyleType::Fill)
    }
}

// The style table is a JSON object keyed by style id. Its order is the order
// records are emitted in, so it goes through an insertion-ordered map.
fn deserialize_styles<'de, D>(deserializer: D) -> Result<Vec<StyleDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let table = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    table
        .into_iter()
        .map(|(id, value)| -> Result<StyleDefinition, D::Error> {
            let raw: RawStyle = serde_json::from_value(value).map_err(D::Error::custom)?;
            Ok(StyleDefinition {
                id,
                name: raw.name,
                style_type: raw.style_type,
            })
        })
        .collect()
}
