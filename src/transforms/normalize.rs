//! Cheap text normalizations: line endings, comments, literal casing.

use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memchr;
use regex::Regex;

use crate::diagnostic::Trail;
use crate::scanner::substitute_outside_strings;
use crate::transforms::to_changed;

static RE_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("static pattern compiles"));
static RE_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("static pattern compiles"));
static RE_TRUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTrue\b").expect("static pattern compiles"));
static RE_FALSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFalse\b").expect("static pattern compiles"));
static RE_NULL_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNULL\b").expect("static pattern compiles"));

/// Normalize `\r\n` and lone `\r` to `\n`.
///
/// Whole-text and string-range unaware: a carriage return inside a string
/// literal is not valid JSON either way, and the later unclosed-string repair
/// escapes whatever newlines remain inside literals.
pub(crate) fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Strip `/* … */` and `// …` comments outside string literals, so URLs and
/// Windows paths inside values survive.
pub(crate) fn strip_comments<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    let mut current: Option<String> = None;
    for re in [&RE_BLOCK_COMMENT, &RE_LINE_COMMENT] {
        let s = current.as_deref().unwrap_or(text);
        let next = to_changed(substitute_outside_strings(s, re, ""));
        if let Some(next) = next {
            current = Some(next);
        }
    }
    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}

/// Rewrite word-bounded `True`/`False`/`NULL` to their JSON spellings
/// outside string literals. Lowercase forms pass through unchanged.
pub(crate) fn normalize_literals<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    let mut current: Option<String> = None;
    for (re, rep) in [
        (&RE_TRUE, "true"),
        (&RE_FALSE, "false"),
        (&RE_NULL_UPPER, "null"),
    ] {
        let s = current.as_deref().unwrap_or(text);
        let next = to_changed(substitute_outside_strings(s, re, rep));
        if let Some(next) = next {
            current = Some(next);
        }
    }
    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}
