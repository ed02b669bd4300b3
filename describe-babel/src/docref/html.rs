//! HTML handlers: `doc.link` becomes an anchor, `doc.copy` renders its target in place.

use super::locate::{anchor_exists, locate_method, locate_path, locate_section};
use super::{DocCopy, DocLink, COPY_ROLE};
use crate::doctree::walk::{walkabout, DispatchTable, Flow};
use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::{FormatError, TargetScope};
use crate::formats::html::serializer::{create_element, HtmlTranslator};

pub fn register(table: &mut DispatchTable<HtmlTranslator>) {
    table
        .register(NodeKind::DocLink, visit_doc_link, depart_doc_link)
        .register(NodeKind::DocCopy, visit_doc_copy, depart_doc_copy);
}

fn visit_doc_link(
    translator: &mut HtmlTranslator,
    doc: &Document,
    node: NodeId,
) -> Result<Flow, FormatError> {
    let link = DocLink::parse(&doc.astext(node), doc, node)?;
    let anchor = link.anchor();
    if !anchor_exists(doc, &anchor) {
        tracing::warn!(%anchor, dpath = %link.dpath, "doc.link target not found in document");
    }

    let class = match link.method {
        Some(_) => "doc-link method",
        None => "doc-link endpoint",
    };
    let href = format!("#{anchor}");
    translator.open(create_element("a", vec![("class", class), ("href", href.as_str())]));
    Ok(Flow::Continue)
}

fn depart_doc_link(
    translator: &mut HtmlTranslator,
    _doc: &Document,
    _node: NodeId,
) -> Result<(), FormatError> {
    translator.close()
}

fn visit_doc_copy(
    translator: &mut HtmlTranslator,
    doc: &Document,
    node: NodeId,
) -> Result<Flow, FormatError> {
    let spec = doc.astext(node);
    let copy = DocCopy::parse(&spec, doc, node)?;
    let not_found = |scope| FormatError::TargetNotFound {
        role: COPY_ROLE,
        scope,
        spec: spec.clone(),
    };

    let endpoint =
        locate_path(doc, node, copy.path()).ok_or_else(|| not_found(TargetScope::Path))?;
    let target = locate_method(doc, endpoint, copy.path(), copy.method())
        .ok_or_else(|| not_found(TargetScope::Method))?;
    tracing::debug!(dpath = %copy.target.dpath, sections = ?copy.sections, "copying");

    translator.begin_copy(target, &spec)?;
    let rendered = render_copy(translator, doc, &copy, target);
    translator.end_copy();
    rendered?;
    Ok(Flow::SkipNode)
}

fn render_copy(
    translator: &mut HtmlTranslator,
    doc: &Document,
    copy: &DocCopy,
    target: NodeId,
) -> Result<(), FormatError> {
    match &copy.sections {
        None => {
            for (index, &child) in doc.children(target).iter().enumerate() {
                let kind = doc.kind(child);
                if (index == 0 && kind == NodeKind::Title) || kind == NodeKind::Meta {
                    continue;
                }
                walkabout(translator, doc, child)?;
            }
        }
        Some(sections) => {
            for name in sections {
                // Missing sections are skipped silently
                if let Some(section) =
                    locate_section(doc, target, copy.path(), copy.method(), name)
                {
                    walkabout(translator, doc, section)?;
                }
            }
        }
    }
    Ok(())
}

fn depart_doc_copy(
    _translator: &mut HtmlTranslator,
    _doc: &Document,
    _node: NodeId,
) -> Result<(), FormatError> {
    Ok(())
}
