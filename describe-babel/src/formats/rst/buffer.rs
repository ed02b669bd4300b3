//! Append-only output buffer with newline collapsing.
//!
//! Fragments are either literal text or control markers. Markers are only resolved in
//! [`Output::data`]:
//!
//! - newline markers are dropped at the very start of the output and whenever the output
//!   already ends with two newlines, so markers never produce a third consecutive newline
//! - separator markers become a single space only when the text on both sides needs one

#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
    Text(String),
    Newline,
    Separator,
}

/// Characters after which a separator needs no space.
const OPENING_PUNCTUATION: &str = "([{<'\"/-";
/// Characters before which a separator needs no space.
const CLOSING_PUNCTUATION: &str = ".,;!?)]}>'\"/-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    fragments: Vec<Fragment>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal fragment.
    pub fn append(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment::Text(text));
        }
    }

    /// Add a newline unless the buffer is empty or already ends in one.
    pub fn newline(&mut self) {
        let ends_in_newline = match self.fragments.last() {
            None => return,
            Some(Fragment::Newline) => true,
            Some(Fragment::Text(text)) => text.ends_with('\n'),
            Some(Fragment::Separator) => false,
        };
        if !ends_in_newline {
            self.fragments.push(Fragment::Newline);
        }
    }

    /// Add two newlines (block separation).
    pub fn emptyline(&mut self) {
        self.fragments.push(Fragment::Newline);
        self.fragments.push(Fragment::Newline);
    }

    /// Add a soft space between inline constructs.
    pub fn separator(&mut self) {
        self.fragments.push(Fragment::Separator);
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Render the buffer to text.
    pub fn data(&self) -> String {
        let mut out = String::new();
        let mut pending_separator = false;
        for fragment in &self.fragments {
            match fragment {
                Fragment::Newline => {
                    pending_separator = false;
                    if out.is_empty() || out.ends_with("\n\n") {
                        continue;
                    }
                    out.push('\n');
                }
                Fragment::Separator => pending_separator = true,
                Fragment::Text(text) => {
                    if pending_separator && needs_space(out.chars().last(), text.chars().next()) {
                        out.push(' ');
                    }
                    pending_separator = false;
                    out.push_str(text);
                }
            }
        }
        out
    }
}

fn needs_space(prev: Option<char>, next: Option<char>) -> bool {
    match (prev, next) {
        (Some(prev), Some(next)) => {
            !prev.is_whitespace()
                && !next.is_whitespace()
                && !OPENING_PUNCTUATION.contains(prev)
                && !CLOSING_PUNCTUATION.contains(next)
        }
        _ => false,
    }
}
