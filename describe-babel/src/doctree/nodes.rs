//! Document node types and kinds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a node within a [`super::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document root (always 0).
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of node kinds a document tree can hold.
///
/// Producers (entry introspection, docstring parsers) emit these; every
/// backend dispatches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Paragraph,
    LiteralBlock,
    /// Generic block-level grouping (docstring bodies, field groups, ...)
    Container,
    Reference,
    Target,
    Meta,
    Text,
    Emphasis,
    Strong,
    Literal,
    Inline,
    InterpretedOrPhraseRef,
    TitleReference,
    InlineInternalTarget,
    FootnoteReference,
    SubstitutionReference,
    AnonymousReference,
    /// `:doc.link:` cross-reference role
    #[serde(rename = "doc.link")]
    DocLink,
    /// `:doc.copy:` cross-reference role
    #[serde(rename = "doc.copy")]
    DocCopy,
}

impl NodeKind {
    /// Inline nodes live inside text elements and are formatted in place.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            NodeKind::Reference
                | NodeKind::Target
                | NodeKind::Text
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Literal
                | NodeKind::Inline
                | NodeKind::InterpretedOrPhraseRef
                | NodeKind::TitleReference
                | NodeKind::InlineInternalTarget
                | NodeKind::FootnoteReference
                | NodeKind::SubstitutionReference
                | NodeKind::AnonymousReference
                | NodeKind::DocLink
                | NodeKind::DocCopy
        )
    }

    /// Text elements hold inline content (text and inline markup).
    pub fn is_text_element(self) -> bool {
        match self {
            NodeKind::Title | NodeKind::Paragraph | NodeKind::LiteralBlock => true,
            NodeKind::Text | NodeKind::Target => false,
            other => other.is_inline(),
        }
    }

    /// Name used in diagnostics and the JSON exchange format.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Paragraph => "paragraph",
            NodeKind::LiteralBlock => "literal_block",
            NodeKind::Container => "container",
            NodeKind::Reference => "reference",
            NodeKind::Target => "target",
            NodeKind::Meta => "meta",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Literal => "literal",
            NodeKind::Inline => "inline",
            NodeKind::InterpretedOrPhraseRef => "interpreted_or_phrase_ref",
            NodeKind::TitleReference => "title_reference",
            NodeKind::InlineInternalTarget => "inline_internal_target",
            NodeKind::FootnoteReference => "footnote_reference",
            NodeKind::SubstitutionReference => "substitution_reference",
            NodeKind::AnonymousReference => "anonymous_reference",
            NodeKind::DocLink => "doc.link",
            NodeKind::DocCopy => "doc.copy",
        }
    }
}

/// A single node in the document arena.
///
/// Structure (`parent`, `children`) is maintained by the owning document;
/// everything else is free-form producer metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub classes: Vec<String>,
    pub ids: Vec<String>,
    pub names: Vec<String>,
    /// String-keyed metadata: `title`, `refuri`, `refid`, `name`, `content`, `path`, `dpath`...
    pub attributes: BTreeMap<String, String>,
    /// Content of `text` leaves
    pub text: Option<String>,
    /// How many references point at this node (targets)
    pub referenced: u32,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            ids: Vec::new(),
            names: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            referenced: 0,
        }
    }

    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text);
        node.text = Some(text.into());
        node
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_referenced(mut self, count: u32) -> Self {
        self.referenced = count;
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}
