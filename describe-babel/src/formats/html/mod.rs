//! HTML format implementation
//!
//! Output-only: renders a document tree as a single, self-contained HTML5 page.
//!
//! # Library Choice
//!
//! The body is built as a `markup5ever_rcdom` tree and serialized by `html5ever`, so text and
//! attribute escaping come from the serializer rather than string concatenation. Only the
//! page wrapper (head, embedded CSS) is formatted by hand.
//!
//! # Element Mapping Table
//!
//! | Node kind        | HTML                                                  | Notes                                   |
//! |------------------|-------------------------------------------------------|-----------------------------------------|
//! | Document         | `<div class="document">`                              | ids become empty `<span id>` anchors    |
//! | Section          | `<div class="section CLASSES" id="FIRST-ID">`         | other ids become `<span id>` anchors    |
//! | Title            | `<hN>`                                                | N = section depth + 1, capped at 6      |
//! | Paragraph        | `<p>`                                                 |                                         |
//! | LiteralBlock     | `<pre class="literal-block CLASSES">`                 |                                         |
//! | Container        | `<div class="container CLASSES">`                     |                                         |
//! | Emphasis         | `<em>`                                                |                                         |
//! | Strong           | `<strong>`                                            |                                         |
//! | Literal          | `<code class="literal">`                              |                                         |
//! | Reference        | `<a class="reference" href>`                          | `refuri`, else `#refid`                 |
//! | Target           | nothing                                               | unless it carries ids                   |
//! | Meta             | `<meta name content>` in the page head                |                                         |
//! | doc.link         | `<a class="doc-link method\|endpoint" href="#ANCHOR">` | dangling targets are logged, not fatal  |
//! | doc.copy         | the target's rendered body                            | see ../../docref/html.rs                |
//!
//! Any other kind renders as `<span class="KIND">`.
//!
//! # CSS
//!
//! `css/baseline.css` is always embedded. The `css` option appends more CSS after it.
//!
//! # Options
//!
//! - `title`: page `<title>`; otherwise the document's `title` attribute, its first title,
//!   then "API Documentation".
//! - `css`: extra CSS text.

pub mod serializer;

use crate::doctree::Document;
use crate::error::FormatError;
use crate::format::{reject_unknown_options, Format};
use std::collections::HashMap;

pub use serializer::{serialize_to_html, HtmlOptions, BASELINE_CSS};

const OPTIONS: &[&str] = &["title", "css"];

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_unknown_options(self.name(), options, OPTIONS)?;
        let mut html_options = self.options.clone();
        if let Some(title) = options.get("title") {
            html_options = html_options.with_title(title.clone());
        }
        if let Some(css) = options.get("css") {
            html_options = html_options.with_custom_css(css.clone());
        }
        serialize_to_html(doc, &html_options)
    }
}
