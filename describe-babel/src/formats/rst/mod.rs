//! reStructuredText format implementation
//!
//! Output-only: renders a document tree back into RST source, including the
//! `:doc.link:` and `:doc.copy:` roles, which are re-emitted with normalized targets
//! instead of being resolved.
//!
//! - ./buffer.rs: output fragments and newline collapsing
//! - ./rules.rs: inline templates and escaping contexts
//! - ./settings.rs: writer settings (section characters, indent, wrap width, title)
//! - ./translator.rs: the tree walk itself

pub mod buffer;
pub mod rules;
pub mod settings;
pub mod translator;

use crate::doctree::Document;
use crate::error::FormatError;
use crate::format::{parse_bool_option, reject_unknown_options, Format};
use settings::RstSettings;
use std::collections::HashMap;
use translator::RstTranslator;

/// Parameters accepted by [`Format::serialize_with_options`].
const OPTIONS: &[&str] = &[
    "section-chars",
    "indent",
    "text-width",
    "explicit-title",
    "title",
];

/// Format implementation for reStructuredText
#[derive(Default)]
pub struct RstFormat {
    settings: RstSettings,
}

impl RstFormat {
    pub fn new(settings: RstSettings) -> Self {
        Self { settings }
    }

    /// Overlay `options` on this format's settings.
    fn settings_with(&self, options: &HashMap<String, String>) -> Result<RstSettings, FormatError> {
        reject_unknown_options(self.name(), options, OPTIONS)?;
        let mut settings = self.settings.clone();
        if let Some(chars) = options.get("section-chars") {
            if chars.is_empty() {
                return Err(FormatError::ParseError(
                    "section-chars must not be empty".to_string(),
                ));
            }
            settings.section_chars = chars.clone();
        }
        if let Some(indent) = options.get("indent") {
            settings.indent = indent.clone();
        }
        if let Some(width) = options.get("text-width") {
            settings.text_width = width.parse().map_err(|_| {
                FormatError::ParseError(format!("Invalid text-width: {width:?}"))
            })?;
        }
        if let Some(explicit) = options.get("explicit-title") {
            settings.explicit_title = parse_bool_option("explicit-title", explicit)?;
        }
        if let Some(title) = options.get("title") {
            settings.title = Some(title.clone());
        }
        Ok(settings)
    }
}

/// Render `doc` as reStructuredText.
pub fn serialize_to_rst(doc: &Document, settings: &RstSettings) -> Result<String, FormatError> {
    tracing::debug!(nodes = doc.len(), "rendering reStructuredText");
    let output = RstTranslator::new(settings.clone()).translate(doc)?;
    tracing::debug!(bytes = output.len(), "rendered reStructuredText");
    Ok(output)
}

impl Format for RstFormat {
    fn name(&self) -> &str {
        "rst"
    }

    fn description(&self) -> &str {
        "reStructuredText"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rst", "txt"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_rst(doc, &self.settings)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let settings = self.settings_with(options)?;
        serialize_to_rst(doc, &settings)
    }
}
