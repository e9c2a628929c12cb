//! Object-key repairs: quoting bare identifiers, filling missing values,
//! wrapping bare key/value text, collapsing duplicate keys.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::Trail;
use crate::parse::{compact, strict_parse};
use crate::scanner::{
    closes_string, is_outside_strings, opens_string, string_ranges,
    substitute_outside_strings, substitute_outside_strings_where,
};
use crate::transforms::{MAX_FIXPOINT_ITERS, fixpoint, to_changed};

// Identifier key right after `{`, `[`, `,` or a newline: { name: "x" }
static RE_UNQUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{\[,\n]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").expect("static pattern compiles")
});

// Key with a comma where its value should be: "name": ,
static RE_MISSING_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(\w+)"\s*:\s*,"#).expect("static pattern compiles"));

/// Wrap identifier keys in quotes, re-applied to a fix-point because quoting
/// one key may align the pattern for the next.
pub(crate) fn quote_unquoted_keys<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    fixpoint(text, MAX_FIXPOINT_ITERS, |s| {
        to_changed(substitute_outside_strings(
            s,
            &RE_UNQUOTED_KEY,
            "${1}\"${2}\"${3}",
        ))
    })
}

/// Substitute `null` for a value that is missing between `:` and `,`.
pub(crate) fn fill_missing_values<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    substitute_outside_strings_where(text, &RE_MISSING_VALUE, "\"${1}\": null,", |caps, ranges| {
        let m = caps.get(0).expect("capture 0 always present");
        let key = caps.get(1).expect("pattern has group 1");
        opens_string(m.start(), ranges)
            && closes_string(key.end(), ranges)
            && is_outside_strings(m.end() - 1, ranges)
    })
}

/// If the text starts with a quoted key (`"…":`) instead of `{` or `[`, wrap
/// the whole text in a top-level object.
pub(crate) fn wrap_bare_pairs<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('"') {
        return Cow::Borrowed(text);
    }
    let first_quote = text.len() - trimmed.len();
    let ranges = string_ranges(text);
    let Some(first) = ranges.first() else {
        return Cow::Borrowed(text);
    };
    if first.start != first_quote || !first.closed {
        return Cow::Borrowed(text);
    }
    if !text[first.end..].trim_start().starts_with(':') {
        return Cow::Borrowed(text);
    }
    trail.note("Wrapped bare key/value pairs in a top-level object");
    Cow::Owned(format!("{{{text}}}"))
}

/// When the current text already parses, adopt JSON's last-wins duplicate-key
/// semantics by re-serializing it. Doubles as an early-exit: the rest of the
/// pass sees strict JSON and leaves it alone.
pub(crate) fn collapse_duplicate_keys<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    match strict_parse(text) {
        Ok(value) => {
            let compacted = compact(&value);
            if compacted == text {
                Cow::Borrowed(text)
            } else {
                Cow::Owned(compacted)
            }
        }
        Err(_) => Cow::Borrowed(text),
    }
}
