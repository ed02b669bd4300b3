//! Section anchor identity shared by id assignment and cross-reference lookup.
//!
//! Endpoint, method and method-subsection ids are all derived from the same tagging
//! function. The producer side ([`crate::doctree::Document::add_endpoint`] and friends)
//! assigns ids with these helpers and the resolver (`crate::docref`) searches with them;
//! if the two ever diverged, lookups would silently fail.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_TAG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Characters used in paths to mark template placeholders (`/users/{id}`, `/files/<name>`).
pub const DECORATION_CHARS: &[char] = &['{', '}', '<', '>'];

/// Map an arbitrary string (path or method name) to an anchor-safe token.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a single `-`, and
/// trims leading/trailing `-`.
///
/// ```ignore
/// assert_eq!(tag("/users/{id}"), "users-id");
/// assert_eq!(tag("GET"), "get");
/// ```
pub fn tag(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_TAG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Anchor of an endpoint section.
pub fn endpoint_id(path: &str) -> String {
    format!("endpoint-{}", tag(path))
}

/// Anchor of a method section below an endpoint.
pub fn method_id(path: &str, method: &str) -> String {
    format!("method-{}-{}", tag(path), tag(method))
}

/// Anchor of a named subsection (`Parameters`, `Returns`, ...) of a method, or of the
/// endpoint itself when there is no method.
pub fn section_id(section: &str, path: &str, method: Option<&str>) -> String {
    let owner = match method {
        Some(method) => method_id(path, method),
        None => endpoint_id(path),
    };
    format!("{}-{owner}", section.to_lowercase())
}

/// Strip placeholder decoration from a path.
pub fn undecorate(path: &str) -> String {
    path.chars()
        .filter(|c| !DECORATION_CHARS.contains(c))
        .collect()
}

/// Join `path` onto `base` and normalize the result, POSIX style.
///
/// An absolute `path` replaces `base`. `.` and empty components are dropped, `..` pops a
/// component, and a trailing slash is removed.
pub fn join_normalized(base: &str, path: &str) -> String {
    let joined = if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };
    normalize(&joined)
}

fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let body = parts.join("/");
    if absolute {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}
