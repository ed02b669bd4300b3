use serde::{Deserialize, Serialize};

/// Default order of section decoration characters, outermost first.
pub const DEFAULT_SECTION_CHARS: &str = "=-`:'\"~^_*+#<>";
pub const DEFAULT_TEXT_WIDTH: usize = 79;
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration for the reStructuredText writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RstSettings {
    /// Over/underline characters by section depth
    pub section_chars: String,

    /// String used to indent literal blocks and metadata fields
    pub indent: String,

    /// Paragraph wrapping width
    pub text_width: usize,

    /// Emit a `.. title::` directive even when it could be inferred
    pub explicit_title: bool,

    /// Override the document title
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for RstSettings {
    fn default() -> Self {
        Self {
            section_chars: DEFAULT_SECTION_CHARS.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            text_width: DEFAULT_TEXT_WIDTH,
            explicit_title: false,
            title: None,
        }
    }
}

impl RstSettings {
    /// Decoration character for a section depth and whether it also gets an overline.
    ///
    /// Depths past the end of the palette cycle through it again, underline only.
    pub fn decoration(&self, level: usize) -> (char, bool) {
        let chars: Vec<char> = self.section_chars.chars().collect();
        if chars.is_empty() {
            let fallback: Vec<char> = DEFAULT_SECTION_CHARS.chars().collect();
            return (fallback[level % fallback.len()], level < fallback.len());
        }
        (chars[level % chars.len()], level < chars.len())
    }
}
