use super::*;

#[test]
fn empty_text_is_unresolved() {
    let report = assert_unresolved("");
    assert_eq!(report.repaired, "");
}

#[test]
fn whitespace_only_is_unresolved() {
    assert_unresolved("   \n\t  \n");
}

#[test]
fn bare_scalar_stays_a_bare_scalar() {
    let report = assert_unresolved("hello");
    // The error-position truncation must not eat the text, and nothing may
    // invent an object around it.
    assert_eq!(report.repaired, "hello");
}

#[test]
fn bare_key_value_is_wrapped_into_an_object() {
    let v = repaired_value(r#""key": "value""#);
    assert_eq!(v, serde_json::json!({ "key": "value" }));
}

#[test]
fn bare_quoted_string_is_not_wrapped() {
    // No colon after the literal, so there is nothing to wrap.
    let report = repair(r#""just a string""#, &opts());
    assert!(report.outcome.is_parsed());
    assert_eq!(report.repaired, r#""just a string""#);
}

#[test]
fn comment_lookalike_inside_string_survives() {
    let v = repaired_value(r#"{"note": "// not a comment", "path": "C:\\x /* y */",}"#);
    assert_eq!(v["note"], "// not a comment");
    assert_eq!(v["path"], "C:\\x /* y */");
}

#[test]
fn binary_noise_is_unresolved_without_panicking() {
    let noise = "\u{0}\u{1}\u{2}ÿþ\u{7f} ???? \u{fffd}";
    assert_unresolved(noise);
}

#[test]
fn extra_unmatched_close_at_start_is_unresolved() {
    assert_unresolved(r#"}{"a": 1}"#);
}

#[test]
fn missing_colon_is_beyond_repair() {
    assert_unresolved("{\n  \"a\" \"b\"\n}");
}

#[test]
fn crlf_line_endings_are_normalized() {
    let v = repaired_value("{\r\n  \"a\": 1,\r\n  \"b\": NULL\r\n}");
    assert_eq!(v["b"], serde_json::Value::Null);
}

#[test]
fn zero_passes_only_checks_strictness() {
    let mut o = opts();
    o.max_passes = 0;
    assert!(repair("{\"a\": 1}", &o).outcome.is_parsed());
    assert!(!repair("{a: 1}", &o).outcome.is_parsed());
}

#[test]
fn literal_normalization_can_be_disabled() {
    let mut o = opts();
    o.normalize_literals = false;
    assert!(!repair(r#"{"a": True}"#, &o).outcome.is_parsed());
    assert!(repair(r#"{"a": True}"#, &opts()).outcome.is_parsed());
}

#[test]
fn comment_stripping_can_be_disabled() {
    let mut o = opts();
    o.strip_comments = false;
    let input = "{\"a\": 1, // c\n \"b\": 2}";
    assert!(!repair(input, &o).outcome.is_parsed());
    assert!(repair(input, &opts()).outcome.is_parsed());
}

#[test]
fn large_flat_document_with_defects_is_repaired() {
    let mut input = String::from("{\n");
    for i in 0..500 {
        input.push_str(&format!("  field_{i}: {i},\n"));
    }
    input.push('}');
    let v = repaired_value(&input);
    assert_eq!(v["field_0"], 0);
    assert_eq!(v["field_499"], 499);
}
