//! Markup formatting rules: inline templates and escaping contexts.

use crate::doctree::NodeKind;

/// Where a piece of text ends up in reStructuredText syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    /// Inside backticks (hyperlink names, interpreted text)
    Backtick,
    /// Inside a `:field:` name
    Colon,
    /// Plain body text
    Text,
}

/// Escape `text` for the given context.
pub fn rst_escape(text: &str, context: EscapeContext) -> String {
    match context {
        EscapeContext::Backtick => {
            if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric()) {
                return text.to_string();
            }
            format!("`{}`", text.replace('\\', "\\\\").replace('`', "\\`"))
        }
        EscapeContext::Colon => {
            if !text.contains(':') && !text.contains('\\') {
                return text.to_string();
            }
            text.replace('\\', "\\\\").replace(':', "\\:")
        }
        EscapeContext::Text => text.to_string(),
    }
}

/// Wrap in backticks unless `text` is a plain alphanumeric token.
pub fn rst_ticks(text: &str) -> String {
    rst_escape(text, EscapeContext::Backtick)
}

/// Escape the argument of an interpreted-text role (`:role:`arg``).
pub fn role_argument(text: &str) -> String {
    format!("`{}`", text.replace('\\', "\\\\").replace('`', "\\`"))
}

/// Escape every character of a title made of a single repeated symbol, so it is not
/// mistaken for a decoration line.
pub fn escape_title(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_ascii_alphanumeric() || !chars.all(|c| c == first) {
        return text.to_string();
    }
    text.chars().flat_map(|c| ['\\', c]).collect()
}

/// Template and optional escaper applied to an inline node's collected text.
#[derive(Clone, Copy)]
pub struct InlineFormat {
    pub template: &'static str,
    pub escaper: Option<fn(&str) -> String>,
}

impl InlineFormat {
    fn plain(template: &'static str) -> Self {
        Self {
            template,
            escaper: None,
        }
    }

    fn ticked(template: &'static str) -> Self {
        Self {
            template,
            escaper: Some(rst_ticks),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        let text = match self.escaper {
            Some(escape) => escape(text),
            None => text.to_string(),
        };
        self.template.replacen("{}", &text, 1)
    }
}

/// Inline template for `kind`, if it is formatted by the default inline handlers.
pub fn inline_format(kind: NodeKind) -> Option<InlineFormat> {
    let format = match kind {
        NodeKind::Inline => InlineFormat::plain("{}"),
        NodeKind::Emphasis => InlineFormat::plain("*{}*"),
        NodeKind::Strong => InlineFormat::plain("**{}**"),
        NodeKind::InterpretedOrPhraseRef => InlineFormat::plain("`{}`"),
        NodeKind::TitleReference => InlineFormat::plain("`{}`"),
        NodeKind::Literal => InlineFormat::plain("``{}``"),
        NodeKind::InlineInternalTarget => InlineFormat::ticked("_{}"),
        NodeKind::FootnoteReference => InlineFormat::plain("[{}]_"),
        NodeKind::SubstitutionReference => InlineFormat::plain("|{}|"),
        NodeKind::Reference => InlineFormat::ticked("{}_"),
        NodeKind::AnonymousReference => InlineFormat::ticked("{}__"),
        _ => return None,
    };
    Some(format)
}
