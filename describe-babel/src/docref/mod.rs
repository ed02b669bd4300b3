//! Cross-reference roles
//!
//!     Two inline roles let one part of a documentation tree point at another part of the
//!     same tree:
//!
//!         :doc.link:`[METHOD:]PATH`                        link to an endpoint or method
//!         :doc.copy:`[METHOD:]PATH[:SECTION[,SECTION]]`    inline a copy of it
//!
//!     PATH is resolved relative to the nearest enclosing endpoint section, so a docstring
//!     on `/users` can say `:doc.link:`GET:{id}`` and mean `/users/{id}`. Placeholder
//!     decoration (`{}`, `<>`) is kept in the decorated path and stripped for anchor lookup.
//!
//!     Each backend registers its own handlers for the two node kinds:
//!
//!     - ./rst.rs: re-emits the role with the normalized target
//!     - ./html.rs: renders a link, or renders the copied sections in place
//!
//!     Targets are found through ./locate.rs, which shares its anchor scheme with the
//!     producer-side helpers in crate::doctree.

pub mod html;
pub mod locate;
pub mod rst;

use crate::common::anchors::{endpoint_id, join_normalized, method_id, undecorate};
use crate::doctree::{Document, NodeId, NodeKind};
use crate::error::FormatError;
use crate::formats::rst::rules::role_argument;
use std::fmt;

const LINK_ROLE: &str = "doc.link";
const COPY_ROLE: &str = "doc.copy";

/// Path of the nearest enclosing endpoint section, or `/`.
fn base_path(doc: &Document, node: NodeId) -> &str {
    for ancestor in doc.ancestors(node) {
        let section = doc.node(ancestor);
        if section.kind != NodeKind::Section || !section.has_class("endpoint") {
            continue;
        }
        // The nearest endpoint decides, even when it carries no path
        return section
            .attr("dpath")
            .filter(|p| !p.is_empty())
            .or_else(|| section.attr("path").filter(|p| !p.is_empty()))
            .unwrap_or("/");
    }
    "/"
}

/// A parsed `:doc.link:` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    /// Normalized path, placeholders kept (`/users/{id}`)
    pub dpath: String,
    /// Normalized path without placeholder decoration (`/users/id`)
    pub path: String,
    pub method: Option<String>,
}

impl DocLink {
    /// Parse `spec` as it appears at `node`.
    pub fn parse(spec: &str, doc: &Document, node: NodeId) -> Result<Self, FormatError> {
        if spec.is_empty() {
            return Err(invalid(LINK_ROLE, spec));
        }
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() > 2 {
            return Err(invalid(LINK_ROLE, spec));
        }
        Ok(Self::from_parts(&parts, doc, node))
    }

    fn from_parts(parts: &[&str], doc: &Document, node: NodeId) -> Self {
        let (method, path) = match parts {
            [method, path] => (Some(*method), *path),
            [path] => (None, *path),
            _ => (None, ""),
        };
        let dpath = join_normalized(base_path(doc, node), path);
        Self {
            path: undecorate(&dpath),
            dpath,
            method: method.filter(|m| !m.is_empty()).map(str::to_string),
        }
    }

    /// Role arguments: `[METHOD, ]DPATH`.
    pub fn args(&self) -> Vec<&str> {
        let mut args = Vec::with_capacity(2);
        if let Some(method) = &self.method {
            args.push(method.as_str());
        }
        args.push(self.dpath.as_str());
        args
    }

    /// Anchor id of the linked endpoint or method section.
    pub fn anchor(&self) -> String {
        match &self.method {
            Some(method) => method_id(&self.path, method),
            None => endpoint_id(&self.path),
        }
    }
}

impl fmt::Display for DocLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{LINK_ROLE}:{}", role_argument(&self.args().join(":")))
    }
}

/// A parsed `:doc.copy:` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocCopy {
    pub target: DocLink,
    /// Subsections to copy, in order; `None` copies the whole target
    pub sections: Option<Vec<String>>,
}

impl DocCopy {
    /// Parse `spec` as it appears at `node`.
    pub fn parse(spec: &str, doc: &Document, node: NodeId) -> Result<Self, FormatError> {
        if spec.is_empty() {
            return Err(invalid(COPY_ROLE, spec));
        }
        let mut parts: Vec<&str> = spec.split(':').collect();
        if parts.len() > 3 {
            return Err(invalid(COPY_ROLE, spec));
        }
        let sections = if parts.len() == 3 {
            parts.pop().map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
        } else {
            None
        };
        Ok(Self {
            target: DocLink::from_parts(&parts, doc, node),
            sections,
        })
    }

    pub fn path(&self) -> &str {
        &self.target.path
    }

    pub fn method(&self) -> Option<&str> {
        self.target.method.as_deref()
    }

    /// Role arguments: `METHOD, DPATH, SECTIONS`, with an empty METHOD when only
    /// sections are given.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(3);
        if self.target.method.is_some() || self.sections.is_some() {
            args.push(self.target.method.clone().unwrap_or_default());
        }
        args.push(self.target.dpath.clone());
        if let Some(sections) = &self.sections {
            args.push(sections.join(","));
        }
        args
    }
}

impl fmt::Display for DocCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{COPY_ROLE}:{}", role_argument(&self.args().join(":")))
    }
}

fn invalid(role: &'static str, spec: &str) -> FormatError {
    FormatError::InvalidSpecifier {
        role,
        spec: spec.to_string(),
    }
}
