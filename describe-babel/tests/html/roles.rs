//! `doc.link` / `doc.copy` in HTML output: resolved against the document

use crate::common::{role, users_api, users_api_with_item, widgets_api};
use describe_babel::doctree::{Document, NodeKind};
use describe_babel::error::{FormatError, TargetScope};
use describe_babel::format::Format;
use describe_babel::formats::html::HtmlFormat;

fn render(doc: &Document) -> Result<String, FormatError> {
    HtmlFormat::default().serialize(doc)
}

#[test]
fn test_link_to_method() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocLink, "See ", "GET:..", " for paging.");
    let html = render(&doc).unwrap();
    assert!(html.contains(
        r##"<p>See <a class="doc-link method" href="#method-users-get">GET:..</a> for paging.</p>"##
    ));
}

#[test]
fn test_link_to_endpoint_with_placeholder() {
    let (mut doc, _) = users_api_with_item();
    let users = doc.lookup_id("method-users-get").unwrap();
    role(&mut doc, users, NodeKind::DocLink, "", "{id}", "");
    let html = render(&doc).unwrap();
    assert!(html.contains(r##"<a class="doc-link endpoint" href="#endpoint-users-id">{id}</a>"##));
}

#[test]
fn test_copy_whole_method() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocCopy, "", "GET:/users", "");
    let html = render(&doc).unwrap();
    assert_eq!(html.matches("<p>List users.</p>").count(), 2);
    // One per method section; the copy leaves its title out
    assert_eq!(html.matches("<h3>GET</h3>").count(), 2);
    assert_eq!(html.matches("<p>HTTPForbidden</p>").count(), 2);
}

#[test]
fn test_copy_sections_in_listed_order() {
    let (mut doc, get) = users_api_with_item();
    role(
        &mut doc,
        get,
        NodeKind::DocCopy,
        "",
        "GET:/users:Returns,Parameters",
        "",
    );
    let html = render(&doc).unwrap();

    assert_eq!(html.matches("<p>limit: page size</p>").count(), 2);
    assert_eq!(html.matches("<p>A list of users.</p>").count(), 2);
    // Not listed, so not copied
    assert_eq!(html.matches("<p>HTTPForbidden</p>").count(), 1);
    // The method description is not part of any listed section
    assert_eq!(html.matches("<p>List users.</p>").count(), 1);

    let copied_returns = html.rfind("<p>A list of users.</p>").unwrap();
    let copied_parameters = html.rfind("<p>limit: page size</p>").unwrap();
    assert!(copied_returns < copied_parameters);
}

#[test]
fn test_copy_skips_missing_sections() {
    let (mut doc, get) = users_api_with_item();
    role(
        &mut doc,
        get,
        NodeKind::DocCopy,
        "",
        "GET:/users:Examples,Raises",
        "",
    );
    let html = render(&doc).unwrap();
    assert_eq!(html.matches("<p>HTTPForbidden</p>").count(), 2);
}

#[test]
fn test_copy_whole_endpoint_without_method() {
    let (mut doc, gadgets) = widgets_api();
    role(&mut doc, gadgets, NodeKind::DocCopy, "", "/widgets", "");
    let html = render(&doc).unwrap();

    assert_eq!(html.matches("<p>Widget body.</p>").count(), 2);
    assert_eq!(html.matches("<p>Handle with care.</p>").count(), 2);
    // Leading title and meta stay with the original
    assert_eq!(html.matches("<h2>/widgets</h2>").count(), 1);
    assert_eq!(html.matches(r#"<meta name="keywords""#).count(), 1);
}

#[test]
fn test_copy_endpoint_section_without_method() {
    let (mut doc, gadgets) = widgets_api();
    role(&mut doc, gadgets, NodeKind::DocCopy, "", ":/widgets:Notes", "");
    let html = render(&doc).unwrap();

    assert_eq!(html.matches("<p>Handle with care.</p>").count(), 2);
    assert_eq!(html.matches("<p>Widget body.</p>").count(), 1);
}

#[test]
fn test_copy_missing_path_fails() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocCopy, "", "GET:/groups", "");
    assert_eq!(
        render(&doc),
        Err(FormatError::TargetNotFound {
            role: "doc.copy",
            scope: TargetScope::Path,
            spec: "GET:/groups".to_string(),
        })
    );
}

#[test]
fn test_copy_missing_method_fails() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocCopy, "", "POST:/users", "");
    assert!(matches!(
        render(&doc),
        Err(FormatError::TargetNotFound {
            scope: TargetScope::Method,
            ..
        })
    ));
}

#[test]
fn test_copy_of_itself_is_circular() {
    let mut doc = users_api();
    let get = doc.lookup_id("method-users-get").unwrap();
    role(&mut doc, get, NodeKind::DocCopy, "", "GET:/users", "");
    assert!(matches!(render(&doc), Err(FormatError::CircularCopy(_))));
}

#[test]
fn test_invalid_link_fails() {
    let (mut doc, get) = users_api_with_item();
    role(&mut doc, get, NodeKind::DocLink, "", "", "");
    assert!(matches!(
        render(&doc),
        Err(FormatError::InvalidSpecifier { role: "doc.link", .. })
    ));
}
