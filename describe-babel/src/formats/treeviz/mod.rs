//! Treeviz formatter for document trees
//!
//! Treeviz is a visual representation of the document tree, useful for checking what a
//! producer emitted before rendering it.
//!
//! It encodes the node structure as box-drawing indentation, 2 columns per level of nesting.
//!
//! So the format is :
//! <prefix><connector> <icon><space><label>
//!
//! Example:
//!
//! ⧉ document (1 items)
//! └─ § section .endpoint #endpoint-users
//!   ├─ ⊤ title
//!   │ └─ ◦ /users
//!   └─ ¶ paragraph
//!     ├─ ◦ See
//!     └─ ⇢ doc.link
//!       └─ ◦ GET:/users
//!
//! Icons
//!     Blocks:
//!         Document: ⧉
//!         Section: §
//!         Title: ⊤
//!         Paragraph: ¶
//!         LiteralBlock: 𝒱
//!         Container: ➔
//!         Meta: ℳ
//!     Spans:
//!         Text: ◦
//!         Emphasis: 𝐼
//!         Strong: 𝐁
//!         Literal: ƒ
//!     References:
//!         Reference: ⊕
//!         Target: ⌖
//!         doc.link: ⇢
//!         doc.copy: ⎘

use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::FormatError;
use crate::format::{parse_bool_option, reject_unknown_options, Format};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

/// Get the Unicode icon for a node kind
pub fn get_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => "⧉",
        NodeKind::Section => "§",
        NodeKind::Title => "⊤",
        NodeKind::Paragraph => "¶",
        NodeKind::LiteralBlock => "𝒱",
        NodeKind::Container => "➔",
        NodeKind::Meta => "ℳ",
        NodeKind::Text => "◦",
        NodeKind::Emphasis => "𝐼",
        NodeKind::Strong => "𝐁",
        NodeKind::Literal => "ƒ",
        NodeKind::Reference | NodeKind::AnonymousReference => "⊕",
        NodeKind::Target | NodeKind::InlineInternalTarget => "⌖",
        NodeKind::DocLink => "⇢",
        NodeKind::DocCopy => "⎘",
        _ => "○",
    }
}

fn truncate(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= LABEL_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(LABEL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn label(doc: &Document, id: NodeId) -> String {
    let node = doc.node(id);
    if let Some(text) = &node.text {
        return truncate(text);
    }
    let mut label = node.kind.name().to_string();
    for class in &node.classes {
        label.push_str(&format!(" .{class}"));
    }
    for node_id in &node.ids {
        label.push_str(&format!(" #{node_id}"));
    }
    label
}

fn format_node(
    doc: &Document,
    id: NodeId,
    prefix: &str,
    is_last: bool,
    include_all: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(doc.kind(id));
    output.push_str(&format!("{prefix}{connector} {icon} {}\n", label(doc, id)));

    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    let children = doc.children(id);

    if include_all {
        let attributes = &doc.node(id).attributes;
        for (i, (key, value)) in attributes.iter().enumerate() {
            let last = children.is_empty() && i == attributes.len() - 1;
            let connector = if last { "└─" } else { "├─" };
            output.push_str(&format!(
                "{child_prefix}{connector} @ {key}={}\n",
                truncate(value)
            ));
        }
    }

    for (i, child) in children.iter().enumerate() {
        format_node(
            doc,
            *child,
            &child_prefix,
            i == children.len() - 1,
            include_all,
            output,
        );
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, false)
}

/// Convert a document to a treeviz string
///
/// With `include_all`, node attributes are listed as `@ key=value` children.
pub fn to_treeviz_str_with_params(doc: &Document, include_all: bool) -> String {
    let root = doc.root();
    let children = doc.children(root);
    let mut output = format!(
        "{} {} ({} items)\n",
        get_icon(NodeKind::Document),
        label(doc, root),
        children.len()
    );
    for (i, child) in children.iter().enumerate() {
        format_node(doc, *child, "", i == children.len() - 1, include_all, &mut output);
    }
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_unknown_options(self.name(), options, &["ast-full"])?;
        let include_all = match options.get("ast-full") {
            Some(value) => parse_bool_option("ast-full", value)?,
            None => false,
        };
        Ok(to_treeviz_str_with_params(doc, include_all))
    }
}
