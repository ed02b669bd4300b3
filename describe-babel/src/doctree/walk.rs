//! Tree walk with per-kind dispatch
//!
//! [`walkabout`] visits a node, its children (in order) and then departs the node. Which
//! code runs for a node is decided by the translator's [`DispatchTable`]: an explicit map
//! from [`NodeKind`] to a (visit, depart) pair, with a fallback pair for kinds nothing was
//! registered for.
//!
//! Each backend owns its own table, so the same custom kinds (`doc.link`, `doc.copy`) can
//! render differently per output format without any shared global state.

use super::{Document, NodeId, NodeKind};
use crate::error::FormatError;
use std::collections::HashMap;

/// What the walk does after a node has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Walk children, then depart.
    Continue,
    /// Skip children, still depart.
    SkipChildren,
    /// Skip children and the departure.
    SkipNode,
}

pub type VisitFn<T> = fn(&mut T, &Document, NodeId) -> Result<Flow, FormatError>;
pub type DepartFn<T> = fn(&mut T, &Document, NodeId) -> Result<(), FormatError>;

/// Visit/depart pair for one node kind.
pub struct Handlers<T> {
    pub visit: VisitFn<T>,
    pub depart: DepartFn<T>,
}

impl<T> Clone for Handlers<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handlers<T> {}

/// Kind → handlers table with a fallback.
pub struct DispatchTable<T> {
    fallback: Handlers<T>,
    handlers: HashMap<NodeKind, Handlers<T>>,
}

impl<T> DispatchTable<T> {
    pub fn new(visit: VisitFn<T>, depart: DepartFn<T>) -> Self {
        Self {
            fallback: Handlers { visit, depart },
            handlers: HashMap::new(),
        }
    }

    /// Register handlers for `kind`, replacing any earlier registration.
    pub fn register(
        &mut self,
        kind: NodeKind,
        visit: VisitFn<T>,
        depart: DepartFn<T>,
    ) -> &mut Self {
        self.handlers.insert(kind, Handlers { visit, depart });
        self
    }

    pub fn get(&self, kind: NodeKind) -> Handlers<T> {
        self.handlers.get(&kind).copied().unwrap_or(self.fallback)
    }
}

/// A backend that can be driven by [`walkabout`].
pub trait Translator: Sized {
    fn dispatch(&self) -> &DispatchTable<Self>;
}

/// Walk `node` and its subtree with `translator`.
pub fn walkabout<T: Translator>(
    translator: &mut T,
    doc: &Document,
    node: NodeId,
) -> Result<(), FormatError> {
    let handlers = translator.dispatch().get(doc.kind(node));
    match (handlers.visit)(translator, doc, node)? {
        Flow::SkipNode => return Ok(()),
        Flow::SkipChildren => {}
        Flow::Continue => {
            for &child in doc.children(node) {
                walkabout(translator, doc, child)?;
            }
        }
    }
    (handlers.depart)(translator, doc, node)
}

/// Noop depart handler.
pub fn depart_nothing<T>(_: &mut T, _: &Document, _: NodeId) -> Result<(), FormatError> {
    Ok(())
}
