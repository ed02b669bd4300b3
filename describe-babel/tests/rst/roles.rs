//! `doc.link` / `doc.copy` in RST output: re-emitted, targets normalized

use crate::common::{role, users_api_with_item};
use describe_babel::doctree::{Document, NodeId, NodeKind};
use describe_babel::error::FormatError;
use describe_babel::format::Format;
use describe_babel::formats::rst::RstFormat;

fn render(doc: &Document) -> Result<String, FormatError> {
    RstFormat::default().serialize(doc)
}

#[test]
fn test_absolute_link_is_reemitted() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocLink, "See ", "GET:/users", " for paging.");
    let out = render(&doc).unwrap();
    assert!(out.contains("\nSee :doc.link:`GET:/users` for paging.\n"));
}

#[test]
fn test_relative_link_resolves_against_endpoint() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocLink, "Back to ", "GET:..", ".");
    role(&mut doc, get, NodeKind::DocLink, "Or ", "./comments", ".");
    let out = render(&doc).unwrap();
    assert!(out.contains("\nBack to :doc.link:`GET:/users`.\n"));
    assert!(out.contains("\nOr :doc.link:`/users/{id}/comments`.\n"));
}

#[test]
fn test_copy_with_sections_keeps_their_order() {
    let (mut doc, get) = users_api_with_item();
    role(
        &mut doc,
        get,
        NodeKind::DocCopy,
        "",
        "GET:/users:Parameters, Returns",
        "",
    );
    let out = render(&doc).unwrap();
    assert!(out.ends_with("\n:doc.copy:`GET:/users:Parameters,Returns`\n"));
}

#[test]
fn test_copy_sections_without_method() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocCopy, "", ":..:Raises", "");
    let out = render(&doc).unwrap();
    assert!(out.ends_with("\n:doc.copy:`:/users:Raises`\n"));
}

#[test]
fn test_roles_are_not_resolved() {
    // The RST writer does not look targets up, so a missing one is no error here
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocCopy, "", "DELETE:/nowhere", "");
    let out = render(&doc).unwrap();
    assert!(out.ends_with("\n:doc.copy:`DELETE:/nowhere`\n"));
}

#[test]
fn test_invalid_specifier_aborts_render() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocLink, "See ", "a:b:c", ".");
    assert_eq!(
        render(&doc),
        Err(FormatError::InvalidSpecifier {
            role: "doc.link",
            spec: "a:b:c".to_string(),
        })
    );

    let mut doc = Document::new();
    role(&mut doc, NodeId::ROOT, NodeKind::DocCopy, "", "GET:/a:b:c", "");
    assert!(matches!(
        render(&doc),
        Err(FormatError::InvalidSpecifier { role: "doc.copy", .. })
    ));
}
