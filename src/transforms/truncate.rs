//! Last-resort truncations: garbage after the document tail, and cutting at
//! the strict parser's reported position. The driver adopts these candidates
//! only when the truncated text actually parses.

use std::borrow::Cow;

/// Cut the text right after the last `}` or `]` found outside string
/// literals, when anything but whitespace follows it.
pub(crate) fn truncate_garbage_tail(text: &str) -> Cow<'_, str> {
    let mut in_string = false;
    let mut escape_next = false;
    let mut last_close: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '}' | ']' if !in_string => last_close = Some(i),
            _ => {}
        }
    }

    let Some(i) = last_close else {
        return Cow::Borrowed(text);
    };
    if text[i + 1..].trim().is_empty() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text[..=i].to_string())
    }
}

/// Take the prefix up to the parse-error offset, then trim any garbage tail
/// the cut left behind. `None` when the result is the input unchanged.
pub(crate) fn truncate_at_error(text: &str, offset: usize) -> Option<String> {
    let prefix = &text[..offset.min(text.len())];
    let trimmed = truncate_garbage_tail(prefix);
    if trimmed.as_ref() == text {
        None
    } else {
        Some(trimmed.into_owned())
    }
}
