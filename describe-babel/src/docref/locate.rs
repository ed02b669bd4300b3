//! Target search for `doc.copy`.
//!
//! All three lookups are pre-order searches for a `section` carrying a given class and
//! anchor id. Only the endpoint lookup climbs to the top of the tree first; method and
//! subsection lookups stay inside the subtree they are given.

use crate::common::anchors::{endpoint_id, method_id, section_id};
use crate::doctree::{Document, NodeId, NodeKind};

fn find_section(doc: &Document, scope: NodeId, class: &str, id: &str) -> Option<NodeId> {
    doc.descendants(scope).find(|&candidate| {
        let node = doc.node(candidate);
        node.kind == NodeKind::Section && node.has_class(class) && node.has_id(id)
    })
}

/// Find the endpoint section for `path`, searching the whole tree `from` belongs to.
pub fn locate_path(doc: &Document, from: NodeId, path: &str) -> Option<NodeId> {
    find_section(doc, doc.top(from), "endpoint", &endpoint_id(path))
}

/// Find the method section below `endpoint`; without a method the endpoint itself is the target.
pub fn locate_method(
    doc: &Document,
    endpoint: NodeId,
    path: &str,
    method: Option<&str>,
) -> Option<NodeId> {
    match method {
        None => Some(endpoint),
        Some(method) => find_section(doc, endpoint, "method", &method_id(path, method)),
    }
}

/// Find a named subsection (`Parameters`, `Returns`, ...) below `scope`.
pub fn locate_section(
    doc: &Document,
    scope: NodeId,
    path: &str,
    method: Option<&str>,
    section: &str,
) -> Option<NodeId> {
    find_section(
        doc,
        scope,
        &section.to_lowercase(),
        &section_id(section, path, method),
    )
}

/// Whether any node in the document carries `id`.
///
/// Checks the registry first, then the tree, so documents assembled without registering
/// their ids still resolve.
pub fn anchor_exists(doc: &Document, id: &str) -> bool {
    doc.has_id(id)
        || doc
            .descendants(doc.root())
            .any(|node| doc.node(node).has_id(id))
}
