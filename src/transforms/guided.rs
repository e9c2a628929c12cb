//! Error-guided recovery: surgical edits keyed on the strict parser's
//! line/column report. The most aggressive transforms in the catalogue, run
//! last by the driver.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::Trail;
use crate::parse::ParseFailure;
use crate::transforms::brackets::{open_brackets, strip_extra_brackets};
use crate::transforms::to_changed;

// A value list followed by a key on the same line: the author closed an
// array implicitly somewhere before that key.
static RE_KEY_AFTER_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[,\}]\s+"[\w]+"\s*:"#).expect("static pattern compiles"));

/// Interpret the parse failure and make one surgical edit: close an array
/// the author left open, or insert the separator the parser asked for.
/// Returns `None` when no branch applies.
pub(crate) fn insert_by_error(
    text: &str,
    failure: &ParseFailure,
    trail: &mut Trail,
) -> Option<String> {
    let line_no = failure.line();
    if line_no == 0 {
        return None;
    }
    let lines: Vec<&str> = text.split('\n').collect();
    if line_no > lines.len() {
        return None;
    }
    let idx = line_no - 1;

    let prefix_len: usize = lines[..=idx].iter().map(|l| l.len()).sum::<usize>() + idx;
    let stack = open_brackets(&text[..prefix_len]);
    let line_text = lines[idx].trim();

    if failure.expecting_comma() && RE_KEY_AFTER_COMMA.is_match(line_text) {
        let full = lines[idx].trim_end();
        if let Some(comma) = full.rfind(',') {
            let left = &full[..comma];
            let right = full[comma + 1..].trim_start();
            let rebuilt = rebuild(&lines, idx, format!("{left}\n    ], {right}"));
            trail.note(format!("Split line {line_no} and inserted ']'"));
            return Some(clean(rebuilt, trail));
        }
    }

    if stack.contains(&'[') {
        for j in (0..idx).rev() {
            let t = lines[j].trim_end();
            if t.ends_with('}') || t.ends_with(']') {
                let rebuilt = rebuild(&lines, j, format!("{t}]"));
                trail.note(format!("Inserted ']' after line {} to close array", j + 1));
                return Some(clean(rebuilt, trail));
            }
        }
        return None;
    }

    if idx > 0 {
        let prev = lines[idx - 1].trim_end();
        let current = lines[idx].trim_start();
        if (prev.ends_with('}') || prev.ends_with(']'))
            && (current.starts_with('"') || current.starts_with('{'))
        {
            let rebuilt = rebuild(&lines, idx - 1, format!("{prev},"));
            trail.note(format!("Inserted ',' after line {idx}"));
            return Some(rebuilt);
        }
    }

    None
}

fn rebuild(lines: &[&str], idx: usize, new_line: String) -> String {
    let mut out = String::new();
    for (i, l) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if i == idx {
            out.push_str(&new_line);
        } else {
            out.push_str(l);
        }
    }
    out
}

fn clean(text: String, trail: &mut Trail) -> String {
    match to_changed(strip_extra_brackets(&text, trail)) {
        Some(cleaned) => cleaned,
        None => text,
    }
}
