//! Document tree
//!
//!     The document tree is what producers (entry introspection, docstring parsers) hand
//!     to the rendering pipeline. It is structurally a generic markup DOM: typed nodes with
//!     classes, ids, names and string attributes.
//!
//!     Nodes live in a single arena owned by the [`Document`]. Children are stored as
//!     [`NodeId`]s and the parent link is an index as well, so walking up (cross-reference
//!     base paths, root lookup) and down (rendering, target search) never implies shared
//!     ownership.
//!
//!     The document also owns the id registry (see ./ids.rs): every id in the tree maps back
//!     to exactly one node.
//!
//!     Traversal for rendering goes through ./walk.rs, which dispatches node kinds to
//!     per-backend handler tables.

mod endpoints;
mod ids;
mod nodes;
pub mod walk;

pub use ids::make_id;
pub use nodes::{Node, NodeId, NodeKind};

use std::collections::BTreeMap;

/// A document tree with its id registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// All nodes (index 0 is always the root).
    nodes: Vec<Node>,
    /// Document-wide id registry.
    ids: BTreeMap<String, NodeId>,
    /// Next auto id number (`id<N>`).
    id_start: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its root node.
    pub fn new() -> Self {
        Self::with_root(Node::new(NodeKind::Document))
    }

    /// Create a document from a prepared root node (its children are discarded).
    pub fn with_root(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        Self {
            nodes: vec![root],
            ids: BTreeMap::new(),
            id_start: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id.
    ///
    /// Ids are only minted by this document, so an unknown id is a caller bug.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].children.is_empty()
    }

    /// Allocate `node` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append a text leaf to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, Node::text(text))
    }

    /// Position of `id` among its siblings.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        idx.checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Iterate over the ancestors of `id`, closest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: self.parent(id),
        }
    }

    /// Climb to the topmost ancestor of `id`.
    pub fn top(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Pre-order iteration over `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Concatenated text of all text leaves below (and including) `id`.
    pub fn astext(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.node(n).text.as_deref())
            .collect()
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.doc.parent(current);
        Some(current)
    }
}

/// Depth-first, pre-order iterator.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Reverse so children come out left-to-right
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}
