//! Comma repairs: removing trailing commas, inserting missing ones.
//!
//! The insertion patterns anchor on structural punctuation and on the quotes
//! of string literals. Quote anchors are validated through the scanner so a
//! closing quote may legally start a match while string interiors never do.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

use crate::diagnostic::Trail;
use crate::scanner::{
    StringRange, closes_string, is_outside_strings, opens_string,
    substitute_outside_strings_where,
};
use crate::transforms::{MAX_FIXPOINT_ITERS, fixpoint, to_changed};

static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("static pattern compiles"));

// Adjacent structures with the separator missing, in several complementary
// shapes. Applied in this order inside one fix-point iteration.
static RE_OBJ_OBJ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\})\s*(\{)").expect("static pattern compiles"));
static RE_CLOSE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\}|\]|")\s*(\{|\[|")"#).expect("static pattern compiles"));
static RE_CLOSE_NL_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\}|\])\s*\n\s*(\{|\[)").expect("static pattern compiles"));
static RE_CLOSE_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\}|\])\s+(")"#).expect("static pattern compiles"));
static RE_VALUE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+|"[^"]*")\s+("[\w]+"\s*:)"#).expect("static pattern compiles")
});
static RE_VALUE_NL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+|"[^"]*"|true|false|null)\s*\n\s*("[\w]+"\s*:)"#)
        .expect("static pattern compiles")
});
static RE_CLOSE_NL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\}|\])\s*\n\s*("[\w]+"\s*:)"#).expect("static pattern compiles")
});

/// Delete commas that sit directly before `}` or `]`, to a fix-point.
pub(crate) fn remove_trailing_commas<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    fixpoint(text, MAX_FIXPOINT_ITERS, |s| {
        to_changed(substitute_outside_strings_where(
            s,
            &RE_TRAILING_COMMA,
            "${1}",
            |caps, ranges| {
                let m = caps.get(0).expect("capture 0 always present");
                is_outside_strings(m.start(), ranges) && is_outside_strings(m.end() - 1, ranges)
            },
        ))
    })
}

/// Insert the separator between adjacent values, objects, arrays and keys,
/// to a fix-point: one insertion may align the next pattern.
pub(crate) fn insert_missing_commas<'t>(text: &'t str, _trail: &mut Trail) -> Cow<'t, str> {
    fixpoint(text, MAX_FIXPOINT_ITERS, |s| {
        let mut current: Option<String> = None;
        for (re, rep) in [
            (&RE_OBJ_OBJ, "${1}, ${2}"),
            (&RE_CLOSE_OPEN, "${1}, ${2}"),
            (&RE_CLOSE_NL_OPEN, "${1},\n${2}"),
            (&RE_CLOSE_STRING, "${1}, ${2}"),
            (&RE_VALUE_KEY, "${1}, ${2}"),
            (&RE_VALUE_NL_KEY, "${1},\n${2}"),
            (&RE_CLOSE_NL_KEY, "${1},\n${2}"),
        ] {
            let base = current.as_deref().unwrap_or(s);
            let next = to_changed(substitute_outside_strings_where(
                base,
                re,
                rep,
                separator_positions_ok,
            ));
            if let Some(next) = next {
                current = Some(next);
            }
        }
        current
    })
}

// A match is sound when the token before the gap ends at a structural
// position and the token after it begins at one.
fn separator_positions_ok(caps: &Captures<'_>, ranges: &[StringRange]) -> bool {
    let before = caps.get(1).expect("pattern has group 1");
    let after = caps.get(2).expect("pattern has group 2");
    token_end_ok(&before, ranges) && token_start_ok(&after, ranges)
}

fn token_end_ok(m: &Match<'_>, ranges: &[StringRange]) -> bool {
    let end = m.end() - 1;
    if m.as_str().ends_with('"') {
        if !closes_string(end, ranges) {
            return false;
        }
        // A multi-char string value must be a complete literal of the
        // current text, not a span between two unrelated quotes.
        if m.as_str().len() > 1 && m.as_str().starts_with('"') {
            return opens_string(m.start(), ranges);
        }
        true
    } else {
        is_outside_strings(m.start(), ranges) && is_outside_strings(end, ranges)
    }
}

fn token_start_ok(m: &Match<'_>, ranges: &[StringRange]) -> bool {
    if m.as_str().starts_with('"') {
        opens_string(m.start(), ranges)
    } else {
        is_outside_strings(m.start(), ranges)
    }
}
