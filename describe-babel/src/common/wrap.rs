//! Greedy word wrapping for paragraph text.
//!
//! Text is cut into alternating word and whitespace chunks, then packed into lines. Whitespace
//! inside a line is kept as written; only the runs that end up at a line break are dropped.

/// Wrap `text` into lines of at most `width` characters.
///
/// Every whitespace character (including newlines) becomes one space, but runs are not
/// collapsed. Hyphenated words may break after the hyphen. Words longer than `width` fill
/// the rest of the current line and continue on the next ones.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = split_chunks(text);
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Chunk> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(Chunk::is_space) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            if line_len + chunk.len > width {
                break;
            }
            line_len += chunk.len;
            line.extend(chunks.pop());
        }

        if let Some(chunk) = chunks.last_mut() {
            if chunk.len > width && line_len < width {
                let (head, tail) = chunk.split_at(width - line_len);
                line_len += head.len;
                line.push(head);
                *chunk = tail;
            }
        }

        if line.last().is_some_and(Chunk::is_space) {
            if let Some(space) = line.pop() {
                line_len -= space.len;
            }
        }

        if line_len > 0 {
            lines.push(line.into_iter().map(|chunk| chunk.text).collect());
        }
    }
    lines
}

#[derive(Debug, Clone, PartialEq)]
struct Chunk {
    text: String,
    len: usize,
}

impl Chunk {
    fn new(chars: &[char]) -> Self {
        Self {
            text: chars.iter().collect(),
            len: chars.len(),
        }
    }

    fn is_space(&self) -> bool {
        self.text.chars().all(|c| c == ' ')
    }

    fn split_at(&self, at: usize) -> (Chunk, Chunk) {
        let chars: Vec<char> = self.text.chars().collect();
        let at = at.clamp(1, chars.len());
        (Chunk::new(&chars[..at]), Chunk::new(&chars[at..]))
    }
}

fn split_chunks(text: &str) -> Vec<Chunk> {
    let chars: Vec<char> = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let space = chars[start] == ' ';
        let mut end = start;
        while end < chars.len() && (chars[end] == ' ') == space {
            end += 1;
        }
        if space {
            chunks.push(Chunk::new(&chars[start..end]));
        } else {
            let word = &chars[start..end];
            let mut from = 0;
            for cut in hyphen_breaks(word) {
                chunks.push(Chunk::new(&word[from..cut]));
                from = cut;
            }
            chunks.push(Chunk::new(&word[from..]));
        }
        start = end;
    }
    chunks
}

/// Positions just after hyphens that join two letter runs, as in `well-known`.
fn hyphen_breaks(word: &[char]) -> Vec<usize> {
    let letter = |i: usize| word.get(i).is_some_and(|c| c.is_alphabetic() || *c == '_');
    (0..word.len())
        .filter(|&i| word[i] == '-')
        .filter(|&i| {
            let before = (i >= 2 && letter(i - 1) && letter(i - 2))
                || (i >= 3 && letter(i - 1) && word[i - 2] == '-' && letter(i - 3));
            let after = letter(i + 1)
                && (letter(i + 2) || (word.get(i + 2) == Some(&'-') && letter(i + 3)));
            before && after
        })
        .map(|i| i + 1)
        .collect()
}
