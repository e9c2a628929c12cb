//! String-literal scanning shared by every transform.
//!
//! All repairs must edit only the complement of the JSON string literals in
//! the current text, otherwise payload data gets corrupted. This module
//! computes the literal ranges with a single escape-aware pass and offers the
//! substitution helpers built on top of them.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Half-open byte range `[start, end)` of one string literal, quotes
/// included. Byte indices always fall on char boundaries.
///
/// `closed` is false for a literal that runs to end-of-text without a
/// terminating quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringRange {
    pub start: usize,
    pub end: usize,
    pub closed: bool,
}

/// Compute the ordered, pairwise-disjoint string-literal ranges of `text`.
///
/// A backslash inside a literal escapes exactly the next character. An
/// unterminated literal extends to end-of-text.
pub(crate) fn string_ranges(text: &str) -> Vec<StringRange> {
    let mut ranges = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;
    let mut open = 0usize;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => {
                if in_string {
                    ranges.push(StringRange {
                        start: open,
                        end: i + 1,
                        closed: true,
                    });
                    in_string = false;
                } else {
                    open = i;
                    in_string = true;
                }
            }
            _ => {}
        }
    }
    if in_string {
        ranges.push(StringRange {
            start: open,
            end: text.len(),
            closed: false,
        });
    }
    ranges
}

/// True when `idx` lies outside every string literal.
pub(crate) fn is_outside_strings(idx: usize, ranges: &[StringRange]) -> bool {
    for r in ranges {
        if r.start > idx {
            break;
        }
        if idx < r.end {
            return false;
        }
    }
    true
}

/// True when `idx` is the opening quote of some literal.
pub(crate) fn opens_string(idx: usize, ranges: &[StringRange]) -> bool {
    ranges.iter().any(|r| r.start == idx)
}

/// True when `idx` is the closing quote of a terminated literal.
pub(crate) fn closes_string(idx: usize, ranges: &[StringRange]) -> bool {
    ranges.iter().any(|r| r.closed && r.end - 1 == idx)
}

/// Replace every match of `re` whose start lies outside all string literals,
/// expanding `$n`/`${n}` groups in `rep`.
pub(crate) fn substitute_outside_strings<'t>(
    text: &'t str,
    re: &Regex,
    rep: &str,
) -> Cow<'t, str> {
    substitute_outside_strings_where(text, re, rep, |caps, ranges| {
        is_outside_strings(caps.get(0).map(|m| m.start()).unwrap_or(0), ranges)
    })
}

/// Like [`substitute_outside_strings`], but with a caller-supplied validity
/// predicate over each match and the current literal ranges. Matches failing
/// the predicate are kept verbatim.
pub(crate) fn substitute_outside_strings_where<'t, F>(
    text: &'t str,
    re: &Regex,
    rep: &str,
    valid: F,
) -> Cow<'t, str>
where
    F: Fn(&Captures<'_>, &[StringRange]) -> bool,
{
    let ranges = string_ranges(text);
    let mut out: Option<String> = None;
    let mut last = 0usize;
    let mut at = 0usize;

    while at <= text.len() {
        let Some(caps) = re.captures_at(text, at) else {
            break;
        };
        let m = caps.get(0).expect("capture 0 always present");
        if !valid(&caps, &ranges) {
            // Re-seek one char past the rejected start: a match beginning
            // inside a literal must not swallow a later structural one.
            at = next_char_boundary(text, m.start());
            continue;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
        buf.push_str(&text[last..m.start()]);
        caps.expand(rep, buf);
        last = m.end();
        at = if m.end() > m.start() {
            m.end()
        } else {
            next_char_boundary(text, m.end())
        };
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

fn next_char_boundary(text: &str, idx: usize) -> usize {
    let mut next = idx + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

/// Build the string-stripped mirror of `text`: string interiors (and escape
/// pairs) become spaces while the quotes and all structural punctuation keep
/// their positions. Bracket analyzers walk this instead of the raw text.
pub(crate) fn string_stripped_mirror(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escape_next = false;
    for ch in text.chars() {
        if escape_next {
            escape_next = false;
            out.push(' ');
            continue;
        }
        if ch == '\\' {
            escape_next = true;
            out.push(' ');
            continue;
        }
        if ch == '"' {
            in_string = !in_string;
            out.push('"');
        } else if in_string {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}
