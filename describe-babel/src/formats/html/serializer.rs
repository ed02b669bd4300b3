//! HTML serialization
//!
//! Converts document trees to semantic HTML5 with embedded CSS.
//! Pipeline: Document → (walk) → RcDom → HTML string → page wrapper

use crate::docref;
use crate::doctree::walk::{walkabout, DispatchTable, Flow, Translator};
use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::FormatError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

const DEFAULT_TITLE: &str = "API Documentation";

/// Stylesheet embedded in every page, ahead of any custom CSS.
pub const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

/// Options for HTML serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlOptions {
    /// Page title; falls back to the document's `title` attribute, then its first title
    pub title: Option<String>,
    /// Optional custom CSS to append after the baseline CSS
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a document to a complete HTML page
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    tracing::debug!(nodes = doc.len(), "rendering HTML");
    let mut translator = HtmlTranslator::new();
    walkabout(&mut translator, doc, doc.root())?;

    let body_html = serialize_dom(&translator.root)?;
    let title = page_title(doc, options);
    let html = wrap_in_document(&body_html, &title, &translator.metas, options);
    tracing::debug!(bytes = html.len(), "rendered HTML");
    Ok(html)
}

fn page_title(doc: &Document, options: &HtmlOptions) -> String {
    if let Some(title) = options.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    let root = doc.node(doc.root());
    if let Some(title) = root.attr("title").filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    doc.children(doc.root())
        .iter()
        .find(|child| doc.kind(**child) == NodeKind::Title)
        .map(|title| doc.astext(*title))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Builds the DOM for one document.
pub struct HtmlTranslator {
    /// The `div.document` container
    root: Handle,
    /// Element children are currently appended to
    current: Handle,
    parents: Vec<Handle>,
    /// Section nesting depth, for heading levels
    depth: usize,
    /// `(name, content)` pairs collected for the page head
    metas: Vec<(String, String)>,
    /// Targets of the `doc.copy` nodes being rendered, innermost last
    copying: Vec<NodeId>,
    table: DispatchTable<HtmlTranslator>,
}

impl Translator for HtmlTranslator {
    fn dispatch(&self) -> &DispatchTable<Self> {
        &self.table
    }
}

impl Default for HtmlTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlTranslator {
    pub fn new() -> Self {
        let mut table = DispatchTable::new(Self::visit_element, Self::depart_element);
        table
            .register(NodeKind::Document, Self::visit_document, Self::depart_nothing)
            .register(NodeKind::Text, Self::visit_text, Self::depart_nothing)
            .register(NodeKind::Section, Self::visit_section, Self::depart_section)
            .register(NodeKind::Target, Self::visit_target, Self::depart_element)
            .register(NodeKind::Meta, Self::visit_meta, Self::depart_nothing);
        docref::html::register(&mut table);

        let root = create_element("div", vec![("class", "document")]);
        Self {
            current: root.clone(),
            root,
            parents: Vec::new(),
            depth: 0,
            metas: Vec::new(),
            copying: Vec::new(),
            table,
        }
    }

    /// Append `element` to the current element and make it current.
    pub fn open(&mut self, element: Handle) {
        self.append(element.clone());
        let parent = std::mem::replace(&mut self.current, element);
        self.parents.push(parent);
    }

    /// Make the parent of the current element current again.
    pub fn close(&mut self) -> Result<(), FormatError> {
        self.current = self.parents.pop().ok_or_else(|| {
            FormatError::SerializationError("Unbalanced element end".to_string())
        })?;
        Ok(())
    }

    /// Append a finished node to the current element.
    pub fn append(&mut self, child: Handle) {
        self.current.children.borrow_mut().push(child);
    }

    /// Start rendering a copy of `target`; fails if it is already being copied.
    pub fn begin_copy(&mut self, target: NodeId, spec: &str) -> Result<(), FormatError> {
        if self.copying.contains(&target) {
            return Err(FormatError::CircularCopy(spec.to_string()));
        }
        self.copying.push(target);
        Ok(())
    }

    pub fn end_copy(&mut self) {
        self.copying.pop();
    }

    fn visit_element(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let element = element_for(doc, node, self.depth);
        self.open(element);
        if doc.kind(node) == NodeKind::Container {
            self.anchor_extra_ids(doc, node);
        }
        Ok(Flow::Continue)
    }

    fn depart_element(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        self.close()
    }

    fn depart_nothing(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        Ok(())
    }

    fn visit_document(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        for id in &doc.node(node).ids {
            self.append(create_element("span", vec![("id", id.as_str())]));
        }
        Ok(Flow::Continue)
    }

    fn visit_text(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        if let Some(text) = doc.node(node).text.as_deref() {
            self.append(create_text(text));
        }
        Ok(Flow::SkipChildren)
    }

    fn visit_section(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let section = doc.node(node);
        let class = class_list("section", &section.classes);
        let mut attrs = vec![("class", class.as_str())];
        if let Some(id) = section.ids.first() {
            attrs.push(("id", id.as_str()));
        }
        self.open(create_element("div", attrs));
        self.anchor_extra_ids(doc, node);
        self.depth += 1;
        Ok(Flow::Continue)
    }

    fn depart_section(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        self.depth = self.depth.saturating_sub(1);
        self.close()
    }

    fn visit_target(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let target = doc.node(node);
        let Some(id) = target.ids.first() else {
            return Ok(Flow::SkipNode);
        };
        self.open(create_element("span", vec![("class", "target"), ("id", id.as_str())]));
        self.anchor_extra_ids(doc, node);
        Ok(Flow::Continue)
    }

    fn visit_meta(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let meta = doc.node(node);
        if let Some(name) = meta.attr("name") {
            let content = meta.attr("content").unwrap_or_default();
            self.metas.push((name.to_string(), content.to_string()));
        }
        Ok(Flow::SkipChildren)
    }

    /// Empty `span` anchors for every id after the first.
    fn anchor_extra_ids(&mut self, doc: &Document, node: NodeId) {
        for id in doc.node(node).ids.iter().skip(1) {
            self.append(create_element("span", vec![("id", id.as_str())]));
        }
    }
}

fn class_list(base: &str, classes: &[String]) -> String {
    std::iter::once(base)
        .chain(classes.iter().map(String::as_str))
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The element a node kind maps to when it has no dedicated handler.
fn element_for(doc: &Document, node: NodeId, depth: usize) -> Handle {
    let element = doc.node(node);
    let id = element.ids.first().map(String::as_str);
    let with_id = |mut attrs: Vec<(&'static str, String)>| {
        if let Some(id) = id {
            attrs.push(("id", id.to_string()));
        }
        attrs
    };

    let (tag, attrs): (String, Vec<(&str, String)>) = match element.kind {
        NodeKind::Title => (format!("h{}", (depth + 1).min(6)), with_id(vec![])),
        NodeKind::Paragraph => ("p".into(), with_id(vec![])),
        NodeKind::LiteralBlock => (
            "pre".into(),
            with_id(vec![("class", class_list("literal-block", &element.classes))]),
        ),
        NodeKind::Container => (
            "div".into(),
            with_id(vec![("class", class_list("container", &element.classes))]),
        ),
        NodeKind::Emphasis => ("em".into(), vec![]),
        NodeKind::Strong => ("strong".into(), vec![]),
        NodeKind::Literal => ("code".into(), vec![("class", "literal".to_string())]),
        NodeKind::TitleReference => ("cite".into(), vec![]),
        NodeKind::Reference | NodeKind::AnonymousReference => {
            let href = element
                .attr("refuri")
                .map(str::to_string)
                .or_else(|| element.attr("refid").map(|id| format!("#{id}")))
                .unwrap_or_default();
            ("a".into(), vec![("class", "reference".to_string()), ("href", href)])
        }
        other => (
            "span".into(),
            with_id(vec![("class", other.name().to_string())]),
        ),
    };

    let attrs: Vec<(&str, &str)> = attrs
        .iter()
        .filter(|(name, value)| *name != "class" || !value.is_empty())
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    create_element(&tag, attrs)
}

/// Create an HTML element with attributes
pub(crate) fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of the document container to an HTML string
fn serialize_dom(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();

    // Use TraversalScope::IncludeNode to serialize each element AND its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the content in a complete HTML document with embedded CSS
fn wrap_in_document(
    body_html: &str,
    title: &str,
    metas: &[(String, String)],
    options: &HtmlOptions,
) -> String {
    let baseline_css = BASELINE_CSS;

    // Custom CSS is appended after the baseline
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    let escaped_title = html_escape(title);
    let meta_tags: String = metas
        .iter()
        .map(|(name, content)| {
            format!(
                "  <meta name=\"{}\" content=\"{}\">\n",
                html_escape(name),
                html_escape(content)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="describe">
{meta_tags}  <title>{escaped_title}</title>
  <style>
{baseline_css}
{custom_css}
  </style>
</head>
<body>
<div class="document">
{body_html}
</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
