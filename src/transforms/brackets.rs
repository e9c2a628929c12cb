//! Bracket repairs: balancing, misplaced-closer insertion, extra-closer
//! cleanup. All analysis walks the string-stripped mirror so literal
//! contents never look structural.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::Trail;
use crate::parse::parses;
use crate::scanner::string_stripped_mirror;

// Whole string literals, for the counting fallback.
static RE_STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\\]|\\.)*""#).expect("static pattern compiles"));

/// The still-open brackets of `text`, outermost first. Mismatched closers are
/// ignored rather than popped.
pub(crate) fn open_brackets(text: &str) -> Vec<char> {
    let mirror = string_stripped_mirror(text);
    let mut stack = Vec::new();
    for ch in mirror.chars() {
        match ch {
            '{' | '[' => stack.push(ch),
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                }
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }
    stack
}

/// Append the closers for every still-open bracket, innermost outward. When
/// the stack analysis finds nothing, fall back to counting occurrences and
/// appending the positive differences, arrays first then objects.
pub(crate) fn balance_brackets<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    let stack = open_brackets(text);
    if !stack.is_empty() {
        let closing: String = stack
            .iter()
            .rev()
            .map(|b| if *b == '{' { '}' } else { ']' })
            .collect();
        trail.note(format!(
            "Appended {} missing bracket(s): {closing}",
            closing.len()
        ));
        return Cow::Owned(format!("{text}{closing}"));
    }

    let stripped = RE_STRING_LITERAL.replace_all(text, "\"\"");
    let count = |c: char| stripped.matches(c).count() as isize;
    let need_square = count('[') - count(']');
    let need_curly = count('{') - count('}');

    if need_square <= 0 && need_curly <= 0 {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    out.push_str(text);
    if need_square > 0 {
        trail.note(format!("Appended {need_square} missing ']' at end"));
        for _ in 0..need_square {
            out.push(']');
        }
    }
    if need_curly > 0 {
        trail.note(format!("Appended {need_curly} missing '}}' at end"));
        for _ in 0..need_curly {
            out.push('}');
        }
    }
    Cow::Owned(out)
}

/// Line-oriented repair for a `]` that arrives while an object is still open
/// inside an open array: insert the missing `}` on its own line before the
/// `]`. At most one insertion per call so the driver can re-evaluate.
pub(crate) fn fix_misplaced_brackets<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    let lines: Vec<&str> = text.split('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_end();
        if !stripped.ends_with(']') || stripped.ends_with("]]") {
            continue;
        }
        let before = stripped[..stripped.len() - 1].trim_end();
        if before.is_empty() {
            continue;
        }
        if !ends_with_value(before) {
            continue;
        }
        let mut content = lines[..i].join("\n");
        content.push('\n');
        content.push_str(before);
        let stack = open_brackets(&content);
        // The `]` is misplaced only when the innermost open container is an
        // object and an array is open beneath it; an `[` on top means the
        // bracket closes its own array.
        if stack.last() != Some(&'{') || !stack.contains(&'[') {
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        let new_line = format!(
            "{before}\n{}}}\n{}]",
            " ".repeat(indent),
            " ".repeat(indent.saturating_sub(4))
        );
        let mut out = String::with_capacity(text.len() + 8);
        for l in &lines[..i] {
            out.push_str(l);
            out.push('\n');
        }
        out.push_str(&new_line);
        if i + 1 < lines.len() {
            out.push('\n');
            out.push_str(&lines[i + 1..].join("\n"));
        }
        trail.note(format!("Inserted '}}' before ']' on line {}", i + 1));
        return Cow::Owned(out);
    }
    Cow::Borrowed(text)
}

fn ends_with_value(before: &str) -> bool {
    before.ends_with('"')
        || before.ends_with('}')
        || before.ends_with("true")
        || before.ends_with("false")
        || before.ends_with("null")
        || before.chars().last().is_some_and(|c| c.is_ascii_digit())
}

/// After a bracket insertion, the tail may carry closers that are now
/// redundant. Strip them one at a time, keeping the shortest prefix that
/// stays balanced and strictly parses.
pub(crate) fn strip_extra_brackets<'t>(text: &'t str, trail: &mut Trail) -> Cow<'t, str> {
    if !open_brackets(text).is_empty() || parses(text) {
        return Cow::Borrowed(text);
    }
    let mut current = text.trim_end();
    let mut removed = 0usize;
    while current.ends_with('}') || current.ends_with(']') {
        let candidate = current[..current.len() - 1].trim_end();
        if !open_brackets(candidate).is_empty() {
            break;
        }
        removed += 1;
        if parses(candidate) {
            trail.note(format!("Removed {removed} extra trailing bracket(s)"));
            return Cow::Owned(candidate.to_string());
        }
        current = candidate;
    }
    Cow::Borrowed(text)
}
