//! JSON tree exchange, end to end through the registry

use crate::common::users_api_with_item;
use describe_babel::error::FormatError;
use describe_babel::registry::FormatRegistry;

const USERS_JSON: &str = r#"{
  "kind": "document",
  "attributes": {"title": "Users API"},
  "children": [
    {
      "kind": "section",
      "classes": ["endpoint"],
      "ids": ["endpoint-users"],
      "names": ["/users"],
      "attributes": {"dpath": "/users", "path": "/users"},
      "children": [
        {"kind": "title", "children": [{"kind": "text", "text": "/users"}]},
        {
          "kind": "section",
          "classes": ["method"],
          "ids": ["method-users-get"],
          "names": ["GET"],
          "attributes": {"method": "GET"},
          "children": [
            {"kind": "title", "children": [{"kind": "text", "text": "GET"}]},
            {"kind": "paragraph", "children": [{"kind": "text", "text": "List users."}]}
          ]
        }
      ]
    },
    {
      "kind": "paragraph",
      "children": [
        {"kind": "text", "text": "Start at "},
        {"kind": "doc.link", "children": [{"kind": "text", "text": "GET:/users"}]},
        {"kind": "text", "text": "."}
      ]
    }
  ]
}"#;

#[test]
fn test_json_to_rst() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(USERS_JSON, "json").unwrap();
    let rst = registry.serialize(&doc, "rst").unwrap();
    assert!(rst.starts_with(
        ".. class:: endpoint\n\n.. id:: endpoint-users\n\n------\n/users\n------\n"
    ));
    assert!(rst.ends_with("\nStart at :doc.link:`GET:/users`.\n"));
}

#[test]
fn test_json_to_html_resolves_links() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(USERS_JSON, "json").unwrap();
    let html = registry.serialize(&doc, "html").unwrap();
    assert!(html.contains("<title>Users API</title>"));
    assert!(html.contains(
        r##"<a class="doc-link method" href="#method-users-get">GET:/users</a>"##
    ));
}

#[test]
fn test_produced_tree_survives_exchange() {
    let (doc, _) = users_api_with_item();
    let registry = FormatRegistry::default();
    let json = registry.serialize(&doc, "json").unwrap();
    let parsed = registry.parse(&json, "json").unwrap();
    assert_eq!(parsed, doc);
    assert_eq!(
        registry.serialize(&parsed, "rst").unwrap(),
        registry.serialize(&doc, "rst").unwrap()
    );
}

#[test]
fn test_malformed_json() {
    let registry = FormatRegistry::default();
    assert!(matches!(
        registry.parse("{\"kind\": ", "json"),
        Err(FormatError::ParseError(_))
    ));
}
