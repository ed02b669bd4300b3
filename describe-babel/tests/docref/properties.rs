//! Invariants of anchor identity and target normalization

use describe_babel::common::anchors::{endpoint_id, tag, undecorate};
use describe_babel::docref::locate::{locate_method, locate_path};
use describe_babel::docref::DocLink;
use describe_babel::doctree::{Document, NodeId};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;

static TAG_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z0-9]+(-[a-z0-9]+)*)?$").unwrap());

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}",
        "[a-z]{1,4}".prop_map(|name| format!("{{{name}}}")),
        "[a-z]{1,4}".prop_map(|name| format!("<{name}>")),
    ]
}

fn dpath() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

fn method() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["GET", "POST", "PUT", "DELETE"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn tag_is_anchor_safe(text in "\\PC{0,40}") {
        prop_assert!(TAG_SHAPE.is_match(&tag(&text)), "tag({text:?}) = {:?}", tag(&text));
    }

    #[test]
    fn normalized_links_are_stable(dpath in dpath(), method in method()) {
        let doc = Document::new();
        let spec = format!("{method}:{dpath}");
        let link = DocLink::parse(&spec, &doc, NodeId::ROOT).unwrap();
        let again = DocLink::parse(&link.args().join(":"), &doc, NodeId::ROOT).unwrap();
        prop_assert_eq!(&again, &link);
        prop_assert_eq!(link.dpath, dpath);
    }

    #[test]
    fn produced_anchors_are_found(dpath in dpath(), method in method()) {
        let mut doc = Document::new();
        let path = undecorate(&dpath);
        let endpoint = doc.add_endpoint(NodeId::ROOT, &path, &dpath).unwrap();
        let section = doc.add_method(endpoint, &method).unwrap();

        prop_assert_eq!(doc.lookup_id(&endpoint_id(&path)), Some(endpoint));
        prop_assert_eq!(locate_path(&doc, NodeId::ROOT, &path), Some(endpoint));
        prop_assert_eq!(locate_method(&doc, endpoint, &path, Some(&method)), Some(section));

        let link = DocLink::parse(&format!("{method}:{dpath}"), &doc, NodeId::ROOT).unwrap();
        prop_assert_eq!(doc.lookup_id(&link.anchor()), Some(section));
    }
}
