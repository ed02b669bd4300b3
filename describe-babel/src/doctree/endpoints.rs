//! Producer-side helpers for endpoint documentation trees.
//!
//! Endpoint, method and method-subsection sections carry the anchors `doc.copy` and
//! `doc.link` search for, so they are built here with the shared anchor helpers rather
//! than by hand.

use super::{Document, Node, NodeId, NodeKind};
use crate::common::anchors::{endpoint_id, method_id, section_id};
use crate::error::FormatError;

impl Document {
    /// Append an endpoint section titled with its decorated path.
    ///
    /// `path` is the undecorated form of `dpath` (`/users/id` for `/users/{id}`); the
    /// anchor is derived from it.
    pub fn add_endpoint(
        &mut self,
        parent: NodeId,
        path: &str,
        dpath: &str,
    ) -> Result<NodeId, FormatError> {
        let section = Node::new(NodeKind::Section)
            .with_class("endpoint")
            .with_name(dpath)
            .with_attr("path", path)
            .with_attr("dpath", dpath);
        self.add_titled(parent, section, &endpoint_id(path), dpath)
    }

    /// Append an HTTP method section below an endpoint section.
    pub fn add_method(&mut self, endpoint: NodeId, method: &str) -> Result<NodeId, FormatError> {
        let path = self.endpoint_path(endpoint).to_string();
        let section = Node::new(NodeKind::Section)
            .with_class("method")
            .with_name(method)
            .with_attr("method", method);
        self.add_titled(endpoint, section, &method_id(&path, method), method)
    }

    /// Append a named subsection (`Parameters`, `Returns`, ...) to a method or endpoint
    /// section.
    pub fn add_method_section(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Result<NodeId, FormatError> {
        let path = self.endpoint_path(parent).to_string();
        let method = self.method_of(parent).map(str::to_string);
        let id = section_id(name, &path, method.as_deref());
        let section = Node::new(NodeKind::Section)
            .with_class(name.to_lowercase())
            .with_name(name);
        self.add_titled(parent, section, &id, name)
    }

    fn add_titled(
        &mut self,
        parent: NodeId,
        section: Node,
        id: &str,
        title: &str,
    ) -> Result<NodeId, FormatError> {
        // Checked up front so a rejected section leaves no orphan behind
        if self.has_id(id) {
            return Err(FormatError::DuplicateId(id.to_string()));
        }
        let section = self.append(parent, section);
        self.assign_id(section, id)?;
        let heading = self.append(section, Node::new(NodeKind::Title));
        self.append_text(heading, title);
        Ok(section)
    }

    /// `path` of `node` or of its nearest endpoint ancestor.
    fn endpoint_path(&self, node: NodeId) -> &str {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .map(|n| self.node(n))
            .find(|n| n.kind == NodeKind::Section && n.has_class("endpoint"))
            .and_then(|n| n.attr("path"))
            .unwrap_or("/")
    }

    /// HTTP method of `node` when it is a method section.
    fn method_of(&self, node: NodeId) -> Option<&str> {
        let section = self.node(node);
        if section.has_class("method") {
            section.attr("method")
        } else {
            None
        }
    }
}
