//! Rendering pipeline for endpoint documentation trees
//!
//!     This crate takes the document tree that describes a web application's URL hierarchy
//!     (endpoints, their HTTP methods, and the sections of their docstrings) and renders it
//!     as reStructuredText or as an HTML page.
//!
//!     TLDR: For format authors:
//!         - The tree is produced elsewhere (entry introspection, docstring parsers). We never
//!           parse RST or HTML; the only inbound format is the JSON tree exchange.
//!         - A backend is a translator: a struct holding its output state plus a dispatch
//!           table mapping each node kind to a (visit, depart) pair. See ./doctree/walk.rs.
//!         - Custom kinds (`doc.link`, `doc.copy`) are registered per backend, in ./docref.
//!         - Every render error aborts the whole document. There is no partial output.
//!
//! Architecture
//!
//!     The document model lives in ./doctree: an arena of nodes addressed by NodeId, with
//!     parent links as indices, plus the document-wide id registry. Rendering is a single
//!     depth-first walk over that tree.
//!
//!     This is a pure lib, that is, it powers describe-cli but is shell agnostic: no code
//!     here should suppose a shell environment, be it printing to stdout, env vars etc.
//!     Diagnostics go through `tracing`; installing a subscriber is the caller's business.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── doctree                 # Document arena, ids, walk + dispatch tables
//!     ├── docref                  # doc.link / doc.copy roles and target search
//!     ├── common                  # Anchor identity, word wrapping
//!     ├── formats
//!     │   ├── rst                 # buffer, rules, settings, translator
//!     │   ├── html                # DOM builder + page wrapper
//!     │   ├── json                # Tree exchange (parse + serialize)
//!     │   └── treeviz             # Debug view of the tree
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── mod.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod (see tests/lib.rs).
//!
//! Cross-references
//!
//!     The two inline roles are what makes this more than a generic tree printer:
//!
//!     - `:doc.link:`[METHOD:]PATH`` links to an endpoint or method section.
//!     - `:doc.copy:`[METHOD:]PATH[:SECTION,...]`` renders (a part of) another endpoint in place.
//!
//!     Relative paths resolve against the nearest enclosing endpoint section. Anchors on both
//!     sides (where ids are assigned, see ./doctree/endpoints.rs, and where they are searched,
//!     see ./docref/locate.rs) come from the same functions in ./common/anchors.rs.
//!
//!     The RST backend does not resolve the roles: it re-emits them with normalized targets, so
//!     the output stays a faithful RST source. The HTML backend resolves them.
//!
//! Library Choices
//!
//!     HTML output is built as an `html5ever` / `markup5ever_rcdom` DOM and serialized by
//!     html5ever, so escaping is never done by hand. JSON goes through serde.
//!
pub mod common;
pub mod docref;
pub mod doctree;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use doctree::{Document, Node, NodeId, NodeKind};
pub use error::{FormatError, TargetScope};
pub use format::Format;
pub use registry::FormatRegistry;
