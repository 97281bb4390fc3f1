//! Document node tree for the toy style engine.
//!
//! The tree is built by an external document parser and handed to the
//! style resolver read-only. Only the element/text discriminant, the tag
//! name and the `id` / `class` attributes are ever consulted by the cascade.
//!
//! # JSON form
//!
//! Trees can be loaded from JSON with [`ToyNode::from_json`]:
//!
//! ```json
//! {
//!   "nodeType": { "tagName": "div", "attributes": { "class": "note" } },
//!   "children": [ { "nodeType": "hello" } ]
//! }
//! ```
//!
//! A text node's `nodeType` is a bare string.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A node of the document tree together with its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyNode {
    /// What kind of node this is.
    pub node_type: ToyNodeType,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<ToyNode>,
}

/// "Each node has an associated node type"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToyNodeType {
    /// Character data. Never matched by any selector.
    Text(String),
    /// An element with a tag name and attributes.
    Element(ElementData),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementData {
    /// The element's local name, e.g. `div`.
    #[serde(rename = "tagName")]
    pub tag_name: String,
    /// The element's attribute list.
    #[serde(default)]
    pub attributes: AttributesMap,
}

/// Errors raised while loading a tree from its serialized form.
#[derive(Debug, Error)]
pub enum DomError {
    /// The input was not a valid JSON node tree.
    #[error("invalid node tree JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// An element was given an empty tag name.
    #[error("element at {path} has an empty tag name")]
    EmptyTagName {
        /// Child-index path from the root, e.g. `root/0/2`.
        path: String,
    },
    /// A text node was given children.
    #[error("text node at {path} cannot have children")]
    TextWithChildren {
        /// Child-index path from the root, e.g. `root/0/2`.
        path: String,
    },
}

impl ElementData {
    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// Returns true if `name` is exactly one of the element's class tokens.
    ///
    /// The attribute is a set of whitespace-separated tokens, so runs of
    /// spaces, tabs or newlines all separate classes.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classlist| classlist.split_ascii_whitespace().any(|c| c == name))
    }
}

impl ToyNodeType {
    /// Get element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            Self::Text(_) => None,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Element(_) => None,
        }
    }
}

impl ToyNode {
    /// Parse a node tree from JSON and check its structure.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Json`] if the text is not a node tree, or a
    /// structural error if an element has an empty tag name or a text node
    /// has children.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let node: Self = serde_json::from_str(json)?;
        node.validate("root")?;
        Ok(node)
    }

    fn validate(&self, path: &str) -> Result<(), DomError> {
        match &self.node_type {
            ToyNodeType::Element(data) if data.tag_name.is_empty() => {
                return Err(DomError::EmptyTagName {
                    path: path.to_string(),
                });
            }
            ToyNodeType::Text(_) if !self.children.is_empty() => {
                return Err(DomError::TextWithChildren {
                    path: path.to_string(),
                });
            }
            _ => {}
        }
        for (i, child) in self.children.iter().enumerate() {
            child.validate(&format!("{path}/{i}"))?;
        }
        Ok(())
    }

    /// Count this node and all of its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

// Constructor functions for convenience:

/// Create a text node.
#[must_use]
pub fn text(data: impl Into<String>) -> ToyNode {
    ToyNode {
        node_type: ToyNodeType::Text(data.into()),
        children: vec![],
    }
}

/// Create an element node.
#[must_use]
pub fn elem(tag_name: impl Into<String>, attributes: AttributesMap, children: Vec<ToyNode>) -> ToyNode {
    ToyNode {
        node_type: ToyNodeType::Element(ElementData {
            tag_name: tag_name.into(),
            attributes,
        }),
        children,
    }
}

/// Build an attribute map from `(name, value)` pairs.
#[must_use]
pub fn attrs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> AttributesMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_class_splits_on_any_whitespace() {
        let node = elem("p", attrs([("class", "foo\tbar  baz\n")]), vec![]);
        let data = node.node_type.as_element().unwrap();
        assert!(data.has_class("foo"));
        assert!(data.has_class("bar"));
        assert!(data.has_class("baz"));
        assert!(!data.has_class(""));
    }

    #[test]
    fn test_has_class_is_token_exact() {
        let node = elem("p", attrs([("class", "foo bar")]), vec![]);
        let data = node.node_type.as_element().unwrap();
        assert!(data.has_class("foo"));
        assert!(data.has_class("bar"));
        assert!(!data.has_class("foobar"));
        assert!(!data.has_class("fo"));
    }

    #[test]
    fn test_id_absent() {
        let node = elem("div", AttributesMap::new(), vec![]);
        assert_eq!(node.node_type.as_element().unwrap().id(), None);
    }

    #[test]
    fn test_node_count_includes_descendants() {
        let tree = elem(
            "div",
            AttributesMap::new(),
            vec![text("a"), elem("p", AttributesMap::new(), vec![text("b")])],
        );
        assert_eq!(tree.node_count(), 4);
    }
}
