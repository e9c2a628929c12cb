//! String-literal repairs: promoting stringified JSON values, deleting stray
//! quotes after numbers, closing unterminated literals.

use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memchr_iter;
use regex::Regex;

use crate::diagnostic::Trail;
use crate::scanner::{opens_string, string_ranges, substitute_outside_strings};
use crate::transforms::to_changed;

// `"key": "{` followed later by `"`: an object/array value that was quoted
// and lost its internal escaping. The first capture keeps the colon, the
// second the bracket, the third the quote that used to terminate the bogus
// literal.
static RE_QUOTED_STRUCTURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(:\s*)"(\s*[\{\[])(\s*")"#).expect("static pattern compiles"));

// Leftover value quote after a closing bracket, in front of `,` `}` `]` or
// end-of-text.
static RE_QUOTE_AFTER_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\}\]]\s*)"(\s*(?:[,\}\]]|$))"#).expect("static pattern compiles")
});

/// Un-quote values that were meant to be objects or arrays: drop the opening
/// quote of the value, then drop the matching stray quote left after the
/// structure closes.
pub(crate) fn promote_stringified_values<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    let mut current: Option<String> = None;

    let promoted = to_changed(substitute_outside_strings(
        text,
        &RE_QUOTED_STRUCTURE,
        "${1}${2}${3}",
    ));
    if let Some(next) = promoted {
        trail.note("Removed quoting around a stringified JSON value");
        current = Some(next);
    }

    let base = current.as_deref().unwrap_or(text);
    let cleaned = to_changed(substitute_outside_strings(
        base,
        &RE_QUOTE_AFTER_CLOSE,
        "${1}${2}",
    ));
    if let Some(next) = cleaned {
        trail.note("Removed stray quote after a closing bracket");
        current = Some(next);
    }

    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}

/// Delete a quote that trails a bare numeric token, as in `"amount": 12.5",`.
/// Re-scans after each deletion because every removal re-pairs the quotes
/// that follow.
pub(crate) fn remove_stray_quotes_after_numbers<'t>(
    text: &'t str,
    trail: &mut Trail,
) -> Cow<'t, str> {
    let mut current: Option<String> = None;
    let mut removed = 0usize;
    loop {
        let s = current.as_deref().unwrap_or(text);
        let Some(pos) = find_stray_quote(s) else {
            break;
        };
        let mut next = String::with_capacity(s.len() - 1);
        next.push_str(&s[..pos]);
        next.push_str(&s[pos + 1..]);
        current = Some(next);
        removed += 1;
    }
    if removed > 0 {
        trail.note(format!(
            "Removed {removed} stray quote(s) after numeric value(s)"
        ));
    }
    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}

fn find_stray_quote(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let ranges = string_ranges(text);
    for pos in memchr_iter(b'"', bytes) {
        // Only a quote that opens a (usually unterminated) literal can be a
        // stray terminator; a closing quote belongs to its string.
        if !opens_string(pos, &ranges) {
            continue;
        }
        let Some(prev) = prev_non_ws(bytes, pos) else {
            continue;
        };
        if !is_number_byte(bytes[prev]) {
            continue;
        }
        let mut token_start = prev;
        while token_start > 0 && is_number_byte(bytes[token_start - 1]) {
            token_start -= 1;
        }
        // `"123"` ends in a digit too; its closing quote is legitimate.
        if token_start > 0 && bytes[token_start - 1] == b'"' {
            continue;
        }
        let Some(next) = next_non_ws(bytes, pos + 1) else {
            continue;
        };
        if matches!(bytes[next], b',' | b']' | b'}') {
            return Some(pos);
        }
    }
    None
}

/// One escape-aware pass over the whole text: escape raw newlines inside
/// string literals, drop a dangling backslash at end-of-text, and close an
/// unterminated literal with a final `"`.
pub(crate) fn fix_unclosed_strings<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    let mut out = String::with_capacity(text.len() + 2);
    let mut in_string = false;
    let mut escape_next = false;
    let mut escaped_newlines = 0usize;

    for ch in text.chars() {
        if escape_next {
            escape_next = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' if in_string => {
                escape_next = true;
                out.push(ch);
            }
            '"' => {
                in_string = !in_string;
                out.push(ch);
            }
            '\n' if in_string => {
                out.push_str("\\n");
                escaped_newlines += 1;
            }
            _ => out.push(ch),
        }
    }

    let mut changed = escaped_newlines > 0;
    if escape_next {
        out.pop();
        trail.note("Dropped dangling '\\' at end of text");
        changed = true;
    }
    if in_string {
        out.push('"');
        trail.note("Appended closing '\"' to unterminated string");
        changed = true;
    }
    if escaped_newlines > 0 {
        trail.note(format!(
            "Escaped {escaped_newlines} raw newline(s) inside string literals"
        ));
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E')
}

fn prev_non_ws(bytes: &[u8], pos: usize) -> Option<usize> {
    (0..pos).rev().find(|&i| !bytes[i].is_ascii_whitespace())
}

fn next_non_ws(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| !bytes[i].is_ascii_whitespace())
}
