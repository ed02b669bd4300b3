//! Parsing of `doc.link` / `doc.copy` specifiers

use crate::common::users_api_with_item;
use describe_babel::docref::{DocCopy, DocLink};
use describe_babel::doctree::{Document, NodeId};
use describe_babel::error::FormatError;

#[test]
fn test_method_and_path() {
    let doc = Document::new();
    let link = DocLink::parse("GET:/users/{id}", &doc, NodeId::ROOT).unwrap();
    assert_eq!(link.method.as_deref(), Some("GET"));
    assert_eq!(link.dpath, "/users/{id}");
    assert_eq!(link.path, "/users/id");
    assert_eq!(link.anchor(), "method-users-id-get");
    assert_eq!(link.to_string(), ":doc.link:`GET:/users/{id}`");
}

#[test]
fn test_path_only_links_to_endpoint() {
    let doc = Document::new();
    let link = DocLink::parse("/users/", &doc, NodeId::ROOT).unwrap();
    assert_eq!(link.method, None);
    assert_eq!(link.dpath, "/users");
    assert_eq!(link.anchor(), "endpoint-users");
}

#[test]
fn test_relative_to_enclosing_endpoint() {
    let (doc, get) = users_api_with_item();
    let link = DocLink::parse("POST:comments/<cid>", &doc, get).unwrap();
    assert_eq!(link.dpath, "/users/{id}/comments/<cid>");
    assert_eq!(link.anchor(), "method-users-id-comments-cid-post");
}

#[test]
fn test_outside_endpoints_resolves_from_root() {
    let doc = Document::new();
    let link = DocLink::parse("users", &doc, NodeId::ROOT).unwrap();
    assert_eq!(link.dpath, "/users");
}

#[test]
fn test_invalid_link_specifiers() {
    let doc = Document::new();
    for spec in ["", "a:b:c"] {
        assert_eq!(
            DocLink::parse(spec, &doc, NodeId::ROOT),
            Err(FormatError::InvalidSpecifier {
                role: "doc.link",
                spec: spec.to_string(),
            })
        );
    }
}

#[test]
fn test_copy_sections() {
    let doc = Document::new();
    let copy = DocCopy::parse("GET:/users:Parameters,Returns", &doc, NodeId::ROOT).unwrap();
    assert_eq!(copy.method(), Some("GET"));
    assert_eq!(copy.path(), "/users");
    assert_eq!(
        copy.sections,
        Some(vec!["Parameters".to_string(), "Returns".to_string()])
    );

    let whole = DocCopy::parse("/users", &doc, NodeId::ROOT).unwrap();
    assert_eq!(whole.sections, None);
    assert_eq!(whole.to_string(), ":doc.copy:`/users`");
}

#[test]
fn test_copy_empty_method_with_sections() {
    let doc = Document::new();
    let copy = DocCopy::parse(":/users:Raises", &doc, NodeId::ROOT).unwrap();
    assert_eq!(copy.method(), None);
    assert_eq!(copy.args(), vec!["", "/users", "Raises"]);
}

#[test]
fn test_invalid_copy_specifiers() {
    let doc = Document::new();
    for spec in ["", "GET:/a:b:c"] {
        assert!(matches!(
            DocCopy::parse(spec, &doc, NodeId::ROOT),
            Err(FormatError::InvalidSpecifier { role: "doc.copy", .. })
        ));
    }
}
