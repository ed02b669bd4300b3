//! Shared fixtures: a small users API, built the way a producer would build it.

use describe_babel::doctree::{Document, Node, NodeId, NodeKind};

pub fn paragraph(doc: &mut Document, parent: NodeId, text: &str) -> NodeId {
    let p = doc.append(parent, Node::new(NodeKind::Paragraph));
    doc.append_text(p, text);
    p
}

/// Paragraph `before` + role(`spec`) + `after`. Returns the role node.
pub fn role(
    doc: &mut Document,
    parent: NodeId,
    kind: NodeKind,
    before: &str,
    spec: &str,
    after: &str,
) -> NodeId {
    let p = doc.append(parent, Node::new(NodeKind::Paragraph));
    if !before.is_empty() {
        doc.append_text(p, before);
    }
    let role = doc.append(p, Node::new(kind));
    doc.append_text(role, spec);
    if !after.is_empty() {
        doc.append_text(p, after);
    }
    role
}

/// `/users` with a documented `GET` (Parameters, Returns, Raises).
pub fn users_api() -> Document {
    let mut doc =
        Document::with_root(Node::new(NodeKind::Document).with_attr("title", "Users API"));
    let users = doc.add_endpoint(NodeId::ROOT, "/users", "/users").unwrap();
    let get = doc.add_method(users, "GET").unwrap();
    paragraph(&mut doc, get, "List users.");
    let parameters = doc.add_method_section(get, "Parameters").unwrap();
    paragraph(&mut doc, parameters, "limit: page size");
    let returns = doc.add_method_section(get, "Returns").unwrap();
    paragraph(&mut doc, returns, "A list of users.");
    let raises = doc.add_method_section(get, "Raises").unwrap();
    paragraph(&mut doc, raises, "HTTPForbidden");
    doc
}

/// [`users_api`] plus `/users/{id}`, whose `GET` is the returned node.
pub fn users_api_with_item() -> (Document, NodeId) {
    let mut doc = users_api();
    let user = doc
        .add_endpoint(NodeId::ROOT, "/users/id", "/users/{id}")
        .unwrap();
    let get = doc.add_method(user, "GET").unwrap();
    paragraph(&mut doc, get, "Fetch one user.");
    (doc, get)
}

/// `/widgets` (no methods: a meta, a body paragraph and a `Notes` section) and an empty
/// `/gadgets`, which is returned.
pub fn widgets_api() -> (Document, NodeId) {
    let mut doc = Document::new();
    let widgets = doc
        .add_endpoint(NodeId::ROOT, "/widgets", "/widgets")
        .unwrap();
    doc.append(
        widgets,
        Node::new(NodeKind::Meta)
            .with_attr("name", "keywords")
            .with_attr("content", "widgets"),
    );
    paragraph(&mut doc, widgets, "Widget body.");
    let notes = doc.add_method_section(widgets, "Notes").unwrap();
    paragraph(&mut doc, notes, "Handle with care.");
    let gadgets = doc
        .add_endpoint(NodeId::ROOT, "/gadgets", "/gadgets")
        .unwrap();
    (doc, gadgets)
}
