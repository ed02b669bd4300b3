//! JSON document tree format
//!
//! Document trees are produced outside this crate (entry introspection, docstring parsers),
//! so JSON is the exchange format: a nested object per node, children inline.
//!
//! ```json
//! {
//!   "kind": "document",
//!   "children": [
//!     {
//!       "kind": "section",
//!       "classes": ["endpoint"],
//!       "ids": ["endpoint-users"],
//!       "attributes": {"path": "/users", "dpath": "/users"},
//!       "children": [{"kind": "title", "children": [{"kind": "text", "text": "/users"}]}]
//!     }
//!   ]
//! }
//! ```
//!
//! Empty fields are omitted on output and default on input. Parsing registers every id in
//! the tree, so duplicate ids are rejected up front.

use crate::doctree::{Document, Node, NodeId, NodeKind};
use crate::error::FormatError;
use crate::format::Format;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonNode {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub referenced: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl JsonNode {
    fn into_parts(self) -> (Node, Vec<JsonNode>) {
        let mut node = Node::new(self.kind);
        node.classes = self.classes;
        node.ids = self.ids;
        node.names = self.names;
        node.attributes = self.attributes;
        node.text = self.text;
        node.referenced = self.referenced;
        (node, self.children)
    }

    fn from_document(doc: &Document, id: NodeId) -> Self {
        let node = doc.node(id);
        Self {
            kind: node.kind,
            classes: node.classes.clone(),
            ids: node.ids.clone(),
            names: node.names.clone(),
            attributes: node.attributes.clone(),
            text: node.text.clone(),
            referenced: node.referenced,
            children: node
                .children
                .iter()
                .map(|child| Self::from_document(doc, *child))
                .collect(),
        }
    }
}

/// Build a document from its JSON tree.
pub fn document_from_json(root: JsonNode) -> Result<Document, FormatError> {
    if root.kind != NodeKind::Document {
        return Err(FormatError::ParseError(format!(
            "Root node must be a document, found '{}'",
            root.kind.name()
        )));
    }
    let (node, children) = root.into_parts();
    let mut doc = Document::with_root(node);
    let mut pending: Vec<(NodeId, JsonNode)> = children
        .into_iter()
        .rev()
        .map(|child| (NodeId::ROOT, child))
        .collect();

    while let Some((parent, json)) = pending.pop() {
        if json.kind == NodeKind::Text && json.text.is_none() {
            return Err(FormatError::ParseError(
                "Text node without text".to_string(),
            ));
        }
        let (node, children) = json.into_parts();
        let id = doc.append(parent, node);
        pending.extend(children.into_iter().rev().map(|child| (id, child)));
    }

    doc.register_all_ids()?;
    Ok(doc)
}

/// Format implementation for JSON document trees
#[derive(Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let root: JsonNode = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid document JSON: {e}")))?;
        document_from_json(root)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let root = JsonNode::from_document(doc, doc.root());
        let mut json = serde_json::to_string_pretty(&root)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}
