//! reStructuredText translator
//!
//! Walks a [`Document`] with [`walkabout`] and re-serializes it as RST. Rendering is
//! buffer based: text elements and inline nodes redirect output into a scratch buffer on
//! visit and fold it back into the enclosing buffer on departure, after formatting it
//! (decorating titles, wrapping paragraphs, wrapping inline markup in its template).
//!
//! Block nodes without a dedicated handler still emit their attribute prologue, so
//! classes, explicit ids and titles survive the round trip even for containers.

use super::buffer::Output;
use super::rules::{escape_title, inline_format, rst_escape, rst_ticks, EscapeContext};
use super::settings::RstSettings;
use crate::common::wrap::wrap;
use crate::docref;
use crate::doctree::walk::{walkabout, DispatchTable, Flow, Translator};
use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::FormatError;

pub struct RstTranslator {
    settings: RstSettings,
    output: Output,
    stack: Vec<Output>,
    level: usize,
    table: DispatchTable<RstTranslator>,
}

impl Translator for RstTranslator {
    fn dispatch(&self) -> &DispatchTable<Self> {
        &self.table
    }
}

impl RstTranslator {
    pub fn new(settings: RstSettings) -> Self {
        let mut table = DispatchTable::new(Self::default_visit, Self::default_departure);
        table
            .register(NodeKind::Text, Self::visit_text, Self::depart_leaf)
            .register(NodeKind::Document, Self::visit_document, Self::depart_document)
            .register(NodeKind::Section, Self::visit_section, Self::depart_section)
            .register(NodeKind::Title, Self::visit_scratch, Self::depart_title)
            .register(NodeKind::Paragraph, Self::visit_scratch, Self::depart_paragraph)
            .register(
                NodeKind::LiteralBlock,
                Self::visit_scratch,
                Self::depart_literal_block,
            )
            .register(NodeKind::Target, Self::visit_target, Self::depart_leaf)
            .register(
                NodeKind::Reference,
                Self::default_visit,
                Self::depart_reference,
            )
            .register(NodeKind::Meta, Self::visit_meta, Self::depart_leaf);
        docref::rst::register(&mut table);

        Self {
            settings,
            output: Output::new(),
            stack: Vec::new(),
            level: 0,
            table,
        }
    }

    /// Render `doc` from its root.
    pub fn translate(mut self, doc: &Document) -> Result<String, FormatError> {
        walkabout(&mut self, doc, doc.root())?;
        Ok(self.output.data())
    }

    /// The buffer currently written to.
    pub fn output(&mut self) -> &mut Output {
        &mut self.output
    }

    /// Redirect output into a fresh scratch buffer.
    pub fn push(&mut self) {
        let previous = std::mem::take(&mut self.output);
        self.stack.push(previous);
    }

    /// Restore the enclosing buffer and return the finished scratch buffer.
    ///
    /// # Panics
    ///
    /// Panics on a pop without a matching push.
    pub fn pop(&mut self) -> Output {
        let previous = self
            .stack
            .pop()
            .expect("output stack underflow: pop without push");
        std::mem::replace(&mut self.output, previous)
    }

    fn default_visit(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        if doc.kind(node).is_inline() {
            self.push();
        } else {
            self.put_attributes(doc, node);
        }
        Ok(Flow::Continue)
    }

    fn default_departure(&mut self, doc: &Document, node: NodeId) -> Result<(), FormatError> {
        let kind = doc.kind(node);
        if !kind.is_inline() {
            return Ok(());
        }
        let text = self.pop().data();
        let format = inline_format(kind)
            .unwrap_or_else(|| panic!("no inline template for `{}` nodes", kind.name()));
        self.output.append(format.apply(&text));
        Ok(())
    }

    fn depart_leaf(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        Ok(())
    }

    fn visit_scratch(&mut self, _doc: &Document, _node: NodeId) -> Result<Flow, FormatError> {
        self.push();
        Ok(Flow::Continue)
    }

    fn visit_text(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        if let Some(text) = doc.node(node).text.as_deref() {
            self.output.append(text);
        }
        Ok(Flow::SkipChildren)
    }

    fn visit_document(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        self.put_attributes(doc, node);
        Ok(Flow::Continue)
    }

    fn depart_document(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        self.output.newline();
        Ok(())
    }

    fn visit_section(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        self.put_attributes(doc, node);
        self.level += 1;
        Ok(Flow::Continue)
    }

    fn depart_section(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        self.level = self.level.saturating_sub(1);
        Ok(())
    }

    fn depart_title(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        let text = escape_title(&self.pop().data());
        let (symbol, overline) = self.settings.decoration(self.level);
        let rule: String = std::iter::repeat(symbol)
            .take(text.chars().count().max(6))
            .collect();

        self.output.emptyline();
        if overline {
            self.output.append(rule.clone());
            self.output.newline();
        }
        self.output.append(text);
        self.output.newline();
        self.output.append(rule);
        self.output.newline();
        Ok(())
    }

    fn depart_paragraph(&mut self, _doc: &Document, _node: NodeId) -> Result<(), FormatError> {
        let text = self.pop().data();
        self.output.emptyline();
        self.output
            .append(wrap(&text, self.settings.text_width).join("\n"));
        self.output.newline();
        Ok(())
    }

    fn depart_literal_block(&mut self, doc: &Document, node: NodeId) -> Result<(), FormatError> {
        let text = self.pop().data();
        let classes = &doc.node(node).classes;

        let mut directive = String::from("::");
        if classes.iter().any(|c| c == "code") {
            directive = String::from(".. code-block::");
            let mut languages: Vec<&str> = classes
                .iter()
                .map(String::as_str)
                .filter(|c| *c != "code")
                .collect();
            if !languages.is_empty() {
                languages.sort_unstable();
                directive.push(' ');
                directive.push_str(&languages.join(" "));
            }
        }

        let indent = &self.settings.indent;
        let body = format!("{indent}{}", text.replace('\n', &format!("\n{indent}")));
        self.output.emptyline();
        self.output.append(directive);
        self.output.emptyline();
        self.output.append(body);
        self.output.newline();
        Ok(())
    }

    fn visit_target(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let target = doc.node(node);
        let inline = target
            .parent
            .is_some_and(|parent| doc.kind(parent).is_text_element());
        // Inline targets are rendered by the preceding reference as `text <uri>`
        if inline && target.referenced <= 1 {
            return Ok(Flow::Continue);
        }
        let name = target.names.first().map(String::as_str).unwrap_or_default();
        let uri = target.attr("refuri").unwrap_or_default();
        self.output.emptyline();
        self.output.append(format!(
            ".. _{}: {}",
            rst_ticks(name),
            rst_escape(uri, EscapeContext::Text)
        ));
        self.output.newline();
        Ok(Flow::Continue)
    }

    fn depart_reference(&mut self, doc: &Document, node: NodeId) -> Result<(), FormatError> {
        let reference = doc.node(node);
        let embeds_target = doc.next_sibling(node).is_some_and(|sibling| {
            let target = doc.node(sibling);
            target.kind == NodeKind::Target
                && target.referenced == 1
                && reference
                    .attr("name")
                    .is_some_and(|name| target.names.iter().any(|n| n == name))
        });
        if embeds_target {
            let text = self.pop().data();
            let uri = reference.attr("refuri").unwrap_or_default();
            self.push();
            self.output.append(format!(
                "{text} <{}>",
                rst_escape(uri, EscapeContext::Text)
            ));
        }
        self.default_departure(doc, node)
    }

    fn visit_meta(&mut self, doc: &Document, node: NodeId) -> Result<Flow, FormatError> {
        let starts_run = doc
            .previous_sibling(node)
            .map_or(true, |previous| doc.kind(previous) != NodeKind::Meta);
        if starts_run {
            self.output.emptyline();
            self.output.append(".. meta::");
            self.output.newline();
        }
        let meta = doc.node(node);
        self.output.append(format!(
            "{}:{}: {}",
            self.settings.indent,
            rst_escape(meta.attr("name").unwrap_or_default(), EscapeContext::Colon),
            rst_escape(meta.attr("content").unwrap_or_default(), EscapeContext::Text),
        ));
        self.output.newline();
        Ok(Flow::Continue)
    }

    /// Emit the `title`, `class` and `id` declarations of a block node.
    fn put_attributes(&mut self, doc: &Document, node: NodeId) {
        let element = doc.node(node);
        let is_document = element.kind == NodeKind::Document;

        let mut forced = false;
        let mut title = None;
        if is_document {
            if let Some(custom) = self.settings.title.as_deref() {
                forced = true;
                title = Some(custom).filter(|t| !t.is_empty());
            }
        }
        let title = title.or_else(|| element.attr("title"));
        if let Some(title) = title {
            let mut emit = forced || self.settings.explicit_title;
            if !emit && is_document {
                // The first title child is what a reader would infer the title from
                let inferred = doc
                    .children(node)
                    .iter()
                    .find(|child| doc.kind(**child) == NodeKind::Title);
                if let Some(&inferred) = inferred {
                    emit = element.attr("title") != Some(doc.astext(inferred).as_str());
                }
            }
            if emit {
                self.output.emptyline();
                self.output.append(format!(".. title:: {title}"));
                self.output.emptyline();
            }
        }

        if !element.classes.is_empty() {
            self.output.emptyline();
            self.output
                .append(format!(".. class:: {}", element.classes.join(" ")));
            self.output.emptyline();
        }

        if !element.ids.is_empty() {
            let generated = doc.canonical_id(node);
            let mut explicit: Vec<&str> = element
                .ids
                .iter()
                .map(String::as_str)
                .filter(|id| *id != generated)
                .collect();
            if !explicit.is_empty() {
                explicit.sort_unstable();
                explicit.dedup();
                self.output.emptyline();
                self.output.append(format!(".. id:: {}", explicit.join(" ")));
                self.output.emptyline();
            }
        }
    }
}
