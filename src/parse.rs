//! Strict parsing and canonical re-serialization.
//!
//! The strict parser is `serde_json` (with `preserve_order`, so object keys
//! keep insertion order and duplicate keys collapse to the last occurrence).
//! Its failures are a signal to the driver, never an error to the caller.

use memchr::memchr_iter;
use serde_json::Value;

/// A failed strict-parse attempt with enough structure for the error-guided
/// transforms: 1-based line/column and a byte offset into the text that was
/// parsed.
#[derive(Debug, Clone)]
pub(crate) struct ParseFailure {
    message: String,
    line: usize,
    offset: Option<usize>,
}

impl ParseFailure {
    fn new(text: &str, err: &serde_json::Error) -> Self {
        let line = err.line();
        let offset = byte_offset(text, line, err.column());
        Self {
            message: err.to_string(),
            line,
            offset,
        }
    }

    #[cfg(test)]
    pub(crate) fn synthetic(message: &str, line: usize, offset: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            offset,
        }
    }

    /// 1-based line of the failure, or 0 when the parser had no position.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of the failure in the parsed text, clamped to a char
    /// boundary. `None` when the parser had no position.
    pub(crate) fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The parser stopped where it wanted a `,` (object or array element
    /// separator).
    pub(crate) fn expecting_comma(&self) -> bool {
        self.message.contains("expected `,`")
    }

    /// The parser stopped where it wanted a `:` after an object key.
    pub(crate) fn expecting_colon(&self) -> bool {
        self.message.contains("expected `:`")
    }
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Attempt a strict parse of `text`.
pub(crate) fn strict_parse(text: &str) -> Result<Value, ParseFailure> {
    serde_json::from_str(text).map_err(|e| ParseFailure::new(text, &e))
}

/// True when `text` is already strict JSON.
pub(crate) fn parses(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

/// Re-serialize a parsed value in the canonical output format: two-space
/// indentation, one pair per line, insertion-ordered keys, non-ASCII kept
/// literal.
pub(crate) fn canonicalize(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("re-serializing a parsed value cannot fail")
}

/// Compact re-serialization used by the duplicate-key collapse mid-pipeline.
pub(crate) fn compact(value: &Value) -> String {
    serde_json::to_string(value).expect("re-serializing a parsed value cannot fail")
}

/// Translate serde_json's 1-based line/column into a byte offset over `text`,
/// clamped to the text length and floored to a char boundary.
fn byte_offset(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let bytes = text.as_bytes();
    let mut line_start = 0usize;
    let mut current = 1usize;
    if line > 1 {
        for nl in memchr_iter(b'\n', bytes) {
            current += 1;
            if current == line {
                line_start = nl + 1;
                break;
            }
        }
        if current != line {
            return None;
        }
    }
    let mut off = (line_start + column - 1).min(text.len());
    while off > 0 && !text.is_char_boundary(off) {
        off -= 1;
    }
    Some(off)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_pretty_and_insertion_ordered() {
        let v = strict_parse(r#"{"b": 1, "a": [1, 2]}"#).unwrap();
        assert_eq!(canonicalize(&v), "{\n  \"b\": 1,\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn duplicate_keys_collapse_to_last_occurrence_in_place() {
        let v = strict_parse(r#"{"v": 1, "w": 0, "v": 2}"#).unwrap();
        assert_eq!(compact(&v), r#"{"v":2,"w":0}"#);
    }

    #[test]
    fn non_ascii_survives_canonicalization() {
        let v = strict_parse(r#"{"name": "张三"}"#).unwrap();
        assert!(canonicalize(&v).contains("张三"));
    }

    #[test]
    fn failure_carries_usable_position() {
        let text = "{\"a\": 1,\n  \"b\" 2}";
        let err = strict_parse(text).unwrap_err();
        assert!(err.expecting_colon());
        assert_eq!(err.line(), 2);
        let off = err.offset().unwrap();
        assert!(off > 8 && off <= text.len());
    }

    #[test]
    fn comma_classification() {
        let err = strict_parse("[1 2]").unwrap_err();
        assert!(err.expecting_comma());
        assert!(!err.expecting_colon());
    }

    #[test]
    fn offset_is_none_without_position() {
        assert_eq!(byte_offset("x", 0, 0), None);
        assert_eq!(byte_offset("x", 9, 1), None);
    }
}
