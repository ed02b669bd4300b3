//! Export tests for the HTML format (document tree → HTML page)

use crate::common::{paragraph, users_api};
use describe_babel::doctree::{Document, Node, NodeId, NodeKind};
use describe_babel::format::Format;
use describe_babel::formats::html::{HtmlFormat, HtmlOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h([1-6])>([^<]*)</h[1-6]>").unwrap());

fn render(doc: &Document) -> String {
    HtmlFormat::default().serialize(doc).unwrap()
}

/// The part of the page inside `<div class="document">`.
fn body(html: &str) -> &str {
    let start = html.find(r#"<div class="document">"#).unwrap();
    let end = html.rfind("</body>").unwrap();
    &html[start..end]
}

#[test]
fn test_page_structure() {
    let html = render(&users_api());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Users API</title>"));
    assert!(html.contains(r#"<meta name="generator" content="describe">"#));
    assert!(html.contains(".document"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_endpoint_sections_carry_anchors() {
    let html = render(&users_api());
    assert!(html.contains(r#"<div class="section endpoint" id="endpoint-users">"#));
    assert!(html.contains(r#"<div class="section method" id="method-users-get">"#));
    assert!(html.contains(
        r#"<div class="section parameters" id="parameters-method-users-get">"#
    ));
}

#[test]
fn test_heading_levels_follow_nesting() {
    let html = render(&users_api());
    let headings: Vec<(String, String)> = HEADING
        .captures_iter(body(&html))
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();
    let expected = [
        ("2", "/users"),
        ("3", "GET"),
        ("4", "Parameters"),
        ("4", "Returns"),
        ("4", "Raises"),
    ];
    assert_eq!(
        headings,
        expected
            .iter()
            .map(|(level, text)| (level.to_string(), text.to_string()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_headings_cap_at_h6() {
    let mut doc = Document::new();
    let mut parent = NodeId::ROOT;
    for depth in 1..=7 {
        parent = doc.append(parent, Node::new(NodeKind::Section));
        let title = doc.append(parent, Node::new(NodeKind::Title));
        doc.append_text(title, format!("Level {depth}"));
    }
    let html = render(&doc);
    assert!(html.contains("<h6>Level 5</h6>"));
    assert!(html.contains("<h6>Level 7</h6>"));
    assert!(!html.contains("<h7>"));
}

#[test]
fn test_text_is_escaped() {
    let mut doc = Document::new();
    paragraph(&mut doc, NodeId::ROOT, "Returns <User> & friends");
    let html = render(&doc);
    assert!(html.contains("<p>Returns &lt;User&gt; &amp; friends</p>"));
}

#[test]
fn test_explicit_title_option() {
    let format = HtmlFormat::new(HtmlOptions::default().with_title("Reference".to_string()));
    let html = format.serialize(&users_api()).unwrap();
    assert!(html.contains("<title>Reference</title>"));
}
