//! reStructuredText handlers: the roles survive into RST output with their targets
//! normalized against the enclosing endpoint.

use super::{DocCopy, DocLink};
use crate::doctree::walk::{DispatchTable, Flow};
use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::FormatError;
use crate::formats::rst::translator::RstTranslator;

pub fn register(table: &mut DispatchTable<RstTranslator>) {
    table
        .register(NodeKind::DocLink, visit_role, depart_doc_link)
        .register(NodeKind::DocCopy, visit_role, depart_doc_copy);
}

fn visit_role(
    translator: &mut RstTranslator,
    _doc: &Document,
    _node: NodeId,
) -> Result<Flow, FormatError> {
    translator.push();
    Ok(Flow::Continue)
}

fn depart_doc_link(
    translator: &mut RstTranslator,
    doc: &Document,
    node: NodeId,
) -> Result<(), FormatError> {
    let spec = translator.pop().data();
    let link = DocLink::parse(&spec, doc, node)?;
    tracing::debug!(dpath = %link.dpath, "re-emitting doc.link");
    emit(translator, link.to_string());
    Ok(())
}

fn depart_doc_copy(
    translator: &mut RstTranslator,
    doc: &Document,
    node: NodeId,
) -> Result<(), FormatError> {
    let spec = translator.pop().data();
    let copy = DocCopy::parse(&spec, doc, node)?;
    tracing::debug!(dpath = %copy.target.dpath, "re-emitting doc.copy");
    emit(translator, copy.to_string());
    Ok(())
}

fn emit(translator: &mut RstTranslator, role: String) {
    let output = translator.output();
    output.separator();
    output.append(role);
    output.separator();
}
