//! Document-wide id registry
//!
//! Ids are unique within a document. Nodes get ids either explicitly from the producer
//! (endpoint/method anchors, see ./endpoints.rs) or from the canonical assignment rule in
//! [`Document::set_id`]: the first of the node's names that yields a free id, otherwise an
//! auto-numbered `id<N>`.
//!
//! The RST prologue needs to know which of a node's ids the canonical rule would have
//! produced anyway, so [`Document::canonical_id`] computes that without touching the registry.

use super::{Document, NodeId};
use crate::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static NON_ID_AT_ENDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-0-9]+|-+$").unwrap());

const AUTO_ID_PREFIX: &str = "id";

/// Convert a name into an identifier: lowercase, runs of other characters become `-`,
/// leading digits/hyphens and trailing hyphens are dropped.
pub fn make_id(name: &str) -> String {
    let lowered = name.to_lowercase();
    let hyphenated = NON_ID_CHARS.replace_all(&lowered, "-");
    NON_ID_AT_ENDS.replace_all(&hyphenated, "").into_owned()
}

impl Document {
    /// Node registered for `id`, if any.
    pub fn lookup_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    fn id_taken_by_other(&self, id: &str, node: NodeId) -> bool {
        self.ids.get(id).is_some_and(|owner| *owner != node)
    }

    /// Give `node` the explicit id `id`.
    ///
    /// Assigning an id the node already carries is a no-op.
    pub fn assign_id(&mut self, node: NodeId, id: &str) -> Result<(), FormatError> {
        if self.id_taken_by_other(id, node) {
            return Err(FormatError::DuplicateId(id.to_string()));
        }
        if !self.node(node).has_id(id) {
            self.node_mut(node).ids.push(id.to_string());
        }
        self.ids.insert(id.to_string(), node);
        Ok(())
    }

    /// Register the ids a node already carries.
    pub fn register_ids(&mut self, node: NodeId) -> Result<(), FormatError> {
        let ids = self.node(node).ids.clone();
        for id in &ids {
            if self.id_taken_by_other(id, node) {
                return Err(FormatError::DuplicateId(id.clone()));
            }
        }
        for id in ids {
            self.ids.insert(id, node);
        }
        Ok(())
    }

    /// Register every id in the tree (used after bulk construction).
    pub fn register_all_ids(&mut self) -> Result<(), FormatError> {
        let all: Vec<NodeId> = self.descendants(self.root()).collect();
        for node in all {
            self.register_ids(node)?;
        }
        Ok(())
    }

    /// Apply the canonical assignment rule: a node without ids receives one.
    ///
    /// Returns the node's first id.
    pub fn set_id(&mut self, node: NodeId) -> Result<String, FormatError> {
        if self.node(node).ids.is_empty() {
            let (id, auto) = self.generate_id(node);
            if let Some(next) = auto {
                self.id_start = next;
            }
            self.node_mut(node).ids.push(id);
        }
        self.register_ids(node)?;
        Ok(self.node(node).ids[0].clone())
    }

    /// The id [`Document::set_id`] would generate for `node` if it carried none.
    ///
    /// The node's own registrations do not count as collisions. The registry and the
    /// auto-id counter are left untouched.
    pub fn canonical_id(&self, node: NodeId) -> String {
        self.generate_id(node).0
    }

    fn generate_id(&self, node: NodeId) -> (String, Option<usize>) {
        for name in &self.node(node).names {
            let id = make_id(name);
            if !id.is_empty() && !self.id_taken_by_other(&id, node) {
                return (id, None);
            }
        }
        let mut counter = self.id_start;
        loop {
            let id = format!("{AUTO_ID_PREFIX}{counter}");
            counter += 1;
            if !self.id_taken_by_other(&id, node) {
                return (id, Some(counter));
            }
        }
    }
}
