//! Rendering tests for the RST writer (document tree → reStructuredText)

use crate::common::{paragraph, users_api};
use describe_babel::doctree::{Document, Node, NodeId, NodeKind};
use describe_babel::format::Format;
use describe_babel::formats::rst::settings::RstSettings;
use describe_babel::formats::rst::{serialize_to_rst, RstFormat};
use insta::assert_snapshot;
use std::collections::HashMap;

fn render(doc: &Document) -> String {
    RstFormat::default().serialize(doc).unwrap()
}

fn titled_section(title: &str) -> Document {
    let mut doc = Document::new();
    let section = doc.append(NodeId::ROOT, Node::new(NodeKind::Section));
    let heading = doc.append(section, Node::new(NodeKind::Title));
    doc.append_text(heading, title);
    doc
}

#[test]
fn test_users_api() {
    assert_snapshot!(render(&users_api()), @r"
    .. class:: endpoint

    .. id:: endpoint-users

    ------
    /users
    ------

    .. class:: method

    .. id:: method-users-get

    ``````
    GET
    ``````

    List users.

    .. class:: parameters

    .. id:: parameters-method-users-get

    ::::::::::
    Parameters
    ::::::::::

    limit: page size

    .. class:: returns

    .. id:: returns-method-users-get

    :::::::
    Returns
    :::::::

    A list of users.

    .. class:: raises

    .. id:: raises-method-users-get

    ::::::
    Raises
    ::::::

    HTTPForbidden
    ");
}

#[test]
fn test_short_title_gets_six_character_rules() {
    assert_eq!(render(&titled_section("Users")), "------\nUsers\n------\n");
}

#[test]
fn test_long_title_rule_matches_title() {
    let out = render(&titled_section("Administrative users"));
    assert_eq!(
        out,
        "--------------------\nAdministrative users\n--------------------\n"
    );
}

#[test]
fn test_symbol_only_title_is_escaped() {
    let out = render(&titled_section("===="));
    assert_eq!(out, "--------\n\\=\\=\\=\\=\n--------\n");
}

#[test]
fn test_deep_sections_drop_overline() {
    let settings = RstSettings {
        section_chars: "=-".to_string(),
        ..RstSettings::default()
    };
    let mut doc = Document::new();
    let mut parent = NodeId::ROOT;
    for title in ["One", "Two", "Three"] {
        parent = doc.append(parent, Node::new(NodeKind::Section));
        let heading = doc.append(parent, Node::new(NodeKind::Title));
        doc.append_text(heading, title);
    }
    let out = serialize_to_rst(&doc, &settings).unwrap();
    assert_eq!(
        out,
        "------\nOne\n------\n\nTwo\n======\n\nThree\n------\n"
    );
}

#[test]
fn test_paragraphs_are_wrapped() {
    let mut doc = Document::new();
    paragraph(
        &mut doc,
        NodeId::ROOT,
        "Returns every user visible to the caller, newest first, paged by limit.",
    );
    let mut options = HashMap::new();
    options.insert("text-width".to_string(), "30".to_string());
    let out = RstFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert_eq!(
        out,
        "Returns every user visible to\nthe caller, newest first,\npaged by limit.\n"
    );
    assert!(out.lines().all(|line| line.chars().count() <= 30));
}

#[test]
fn test_explicit_title() {
    let mut doc =
        Document::with_root(Node::new(NodeKind::Document).with_attr("title", "Users API"));
    paragraph(&mut doc, NodeId::ROOT, "Body.");

    assert_eq!(render(&doc), "Body.\n");

    let settings = RstSettings {
        explicit_title: true,
        ..RstSettings::default()
    };
    assert_eq!(
        serialize_to_rst(&doc, &settings).unwrap(),
        ".. title:: Users API\n\nBody.\n"
    );
}

#[test]
fn test_container_keeps_classes() {
    let mut doc = Document::new();
    let container = doc.append(
        NodeId::ROOT,
        Node::new(NodeKind::Container).with_class("note"),
    );
    paragraph(&mut doc, container, "Deprecated.");
    assert_eq!(render(&doc), ".. class:: note\n\nDeprecated.\n");
}
