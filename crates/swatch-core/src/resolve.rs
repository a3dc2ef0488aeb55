//! Style resolution: mapping style ids to the nodes that use them.
//!
//! A style definition only says *that* a colour exists; the colour value
//! itself lives on the nodes that reference the style. [`StyleResolver`]
//! walks the tree depth-first, in document order, and returns the first
//! eligible leaf whose `fill` slot references the style.
//!
//! When several nodes share a style, the first one in document order wins and
//! the rest are ignored. Styles that no eligible leaf uses, or whose leaf has
//! no solid first fill, produce no record.

use serde::Serialize;

use crate::document::{ColorValue, Document, DocumentNode, NodeType, StyleDefinition};

/// A resolved colour style: the style's display name and its colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStyleRecord {
    pub name: String,
    pub color: ColorValue,
}

impl ColorStyleRecord {
    pub fn new(name: impl Into<String>, color: ColorValue) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Finds style consumers in a document tree.
///
/// Only leaves of the eligible shape kind are considered, [`NodeType::Ellipse`]
/// by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleResolver {
    shape: NodeType,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver {
    pub fn new() -> Self {
        Self {
            shape: NodeType::Ellipse,
        }
    }

    /// Sets the shape kind whose leaves may carry a style's colour.
    pub fn with_shape(mut self, shape: NodeType) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> NodeType {
        self.shape
    }

    /// Whether `node` is a leaf of the eligible shape kind.
    pub fn is_eligible(&self, node: &DocumentNode) -> bool {
        node.is_leaf() && node.kind == self.shape
    }

    /// Returns the first eligible leaf, in document order, whose `fill` style
    /// is `style_id`.
    ///
    /// Traversal uses an explicit stack, so deep trees cannot overflow the
    /// call stack, and stops at the first match.
    pub fn resolve<'a>(&self, root: &'a DocumentNode, style_id: &str) -> Option<&'a DocumentNode> {
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match &node.children {
                // Reversed so the first child is visited next.
                Some(children) => stack.extend(children.iter().rev()),
                None => {
                    if self.is_eligible(node) && node.fill_style() == Some(style_id) {
                        return Some(node);
                    }
                }
            }
        }

        None
    }

    /// Resolves one style definition to a record, if some eligible leaf uses it
    /// and that leaf's first fill has a colour.
    pub fn record_for(
        &self,
        root: &DocumentNode,
        style: &StyleDefinition,
    ) -> Option<ColorStyleRecord> {
        let Some(node) = self.resolve(root, &style.id) else {
            tracing::debug!(style = %style.name, id = %style.id, "style is not used by any eligible node");
            return None;
        };

        match node.first_fill_color() {
            Some(color) => Some(ColorStyleRecord::new(style.name.clone(), color)),
            None => {
                tracing::debug!(style = %style.name, node = %node.id, "style node has no solid first fill");
                None
            }
        }
    }

    /// Maps every `FILL` style of the document to a record, in style-table
    /// order, dropping styles that cannot be resolved.
    pub fn color_records(&self, document: &Document) -> Vec<ColorStyleRecord> {
        document
            .fill_styles()
            .filter_map(|style| self.record_for(&document.document, style))
            .collect()
    }
}

/// Finds the first ellipse leaf whose `fill` style is `style_id`.
///
/// Shorthand for [`StyleResolver::resolve`] with the default resolver.
pub fn find_style_node<'a>(root: &'a DocumentNode, style_id: &str) -> Option<&'a DocumentNode> {
    StyleResolver::new().resolve(root, style_id)
}

/// Collects the colour records of a document with the default resolver.
pub fn collect_color_styles(document: &Document) -> Vec<ColorStyleRecord> {
    StyleResolver::new().color_records(document)
}
