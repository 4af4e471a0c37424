//! Text helpers shared by all extractors.
//!
//! [`text_field`] is the "extract if present" primitive every optional record field goes through.
//! The other functions are the few ways the forum's text has to be read or cut.
use std::borrow::Cow;

use scraper::ElementRef;

/// Something a field value can be read from: a node of the page or an already computed string.
pub trait TextSource {
    fn source_text(&self) -> Cow<'_, str>;
}

impl TextSource for ElementRef<'_> {
    fn source_text(&self) -> Cow<'_, str> {
        Cow::Owned(node_text(*self))
    }
}

impl TextSource for &str {
    fn source_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

impl TextSource for String {
    fn source_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Reads the text of `source`, removes every pattern of `removals` in order, and returns the result only
/// if something is left.
///
/// ```rust
/// use forum_parser::forum::extractors::fields::text_field;
///
/// assert_eq!(text_field(Some("\t12 Antworten\n"), &["\t", "\n"]).as_deref(), Some("12 Antworten"));
/// assert_eq!(text_field(Some("\n\t"), &["\t", "\n"]), None);
/// assert_eq!(text_field(None::<&str>, &[]), None);
/// ```
pub fn text_field<S: TextSource>(source: Option<S>, removals: &[&str]) -> Option<String> {
    let source = source?;
    let mut text = source.source_text().into_owned();

    for pattern in removals.iter().filter(|p| !p.is_empty()) {
        text = text.replace(*pattern, "");
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// All text of the node and its descendants, untouched.
pub fn node_text(el: ElementRef) -> String {
    el.text().collect()
}

/// Every text piece of the node trimmed, then glued together without separator.
pub fn stripped_text(el: ElementRef) -> String {
    el.text().map(str::trim).collect()
}

/// Non-empty text pieces of the node trimmed and joined by a single space.
pub fn separated_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `n` characters of `s` (or all of it if it is shorter).
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `s` without its first `n` characters.
pub fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// `s` without its last `n` characters.
pub fn drop_last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return s;
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}

/// Collapses every run of three or more newlines into exactly two.
pub fn collapse_newlines(s: &str) -> String {
    let mut out = s.to_string();
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out
}
