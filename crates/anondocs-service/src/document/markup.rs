//! Helpers over document body markup.
//!
//! Bodies are HTML fragments produced by a rich-text editor. These helpers
//! work on the raw text with regular expressions; they are not an HTML
//! parser and do not try to be one.

use std::sync::LazyLock;

use regex::Regex;

use anondocs_entity::document::DocumentStats;

/// Longest title derived from body text, in characters.
pub const DERIVED_TITLE_MAX_CHARS: usize = 40;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<script[\s\S]*?>[\s\S]*?</script>").expect("valid script regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Removes `<script>` blocks, including their contents.
pub fn sanitize(html: &str) -> String {
    SCRIPT_BLOCK.replace_all(html, "").into_owned()
}

/// Removes every tag, leaving the text between them.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Escapes text for safe inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First line of the body's text, cut to [`DERIVED_TITLE_MAX_CHARS`].
///
/// Returns `None` when the body has no visible text.
pub fn derive_title(html: &str) -> Option<String> {
    let text = strip_tags(html);
    let first_line = text.trim().lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return None;
    }
    Some(first_line.chars().take(DERIVED_TITLE_MAX_CHARS).collect())
}

/// Word and character counts of the body's text.
pub fn stats(html: &str) -> DocumentStats {
    let text = strip_tags(html);
    DocumentStats {
        words: text.split_whitespace().count(),
        chars: text.chars().filter(|c| !c.is_whitespace()).count(),
    }
}

/// Character offset of the first occurrence of `term` in the body's text
/// that starts strictly after `after` (or anywhere, when `after` is `None`).
pub fn find(html: &str, term: &str, after: Option<usize>) -> Option<usize> {
    let text = strip_tags(html);
    let start_char = after.map_or(0, |a| a + 1);

    let start_byte = match text.char_indices().nth(start_char) {
        Some((byte, _)) => byte,
        None => return None,
    };

    let byte = text[start_byte..].find(term)? + start_byte;
    Some(text[..byte].chars().count())
}
