use super::*;

#[test]
fn outcome_accessors() {
    let parsed = repair(r#"{"a": 1}"#, &opts()).outcome;
    assert!(parsed.is_parsed());
    assert!(parsed.canonical().is_some());
    assert!(parsed.error().is_none());

    let unresolved = repair("hello", &opts()).outcome;
    assert!(!unresolved.is_parsed());
    assert!(unresolved.canonical().is_none());
    assert!(unresolved.error().is_some());
}

#[test]
fn canonical_output_uses_two_space_indent_and_insertion_order() {
    let canonical = repair_to_string(r#"{"z": 1, "a": [true, null], }"#, &opts()).unwrap();
    assert_eq!(
        canonical,
        "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
    );
}

#[test]
fn canonical_output_keeps_non_ascii_literal() {
    let canonical = repair_to_string(r#"{ name: "张三" }"#, &opts()).unwrap();
    assert!(canonical.contains("张三"));
    assert!(!canonical.contains("\\u"));
}

#[test]
fn repair_to_string_surfaces_the_last_error() {
    let err = repair_to_string("hello", &opts()).unwrap_err();
    match err {
        RepairError::Unresolved { passes, message } => {
            assert_eq!(passes, 6);
            assert!(message.contains("expected"));
        }
        other => panic!("unexpected error variant: {other}"),
    }
}

#[test]
fn repair_to_writer_writes_canonical_bytes() {
    let mut out = Vec::new();
    repair_to_writer("[1,]", &opts(), &mut out).unwrap();
    assert_eq!(out, b"[\n  1\n]");
}

#[test]
fn loads_returns_a_value() {
    let v = loads(r#"{ retries: 3, backoff: True }"#, &opts()).unwrap();
    assert_eq!(v["retries"], 3);
    assert_eq!(v["backoff"], true);
}

#[test]
fn report_serializes_for_tooling() {
    let report = repair(r#"{ a: 1, }"#, &opts());
    let json = serde_json::to_string(&report).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(v["repaired"].is_string());
    assert!(v["outcome"]["parsed"].is_string());
    assert!(v["diagnostics"].is_array());
    let diags = v["diagnostics"].as_array().unwrap();
    assert!(diags.iter().all(|d| d.is_string()));
}

#[test]
fn unresolved_outcome_serializes_with_its_error() {
    let report = repair("hello", &opts());
    let v = serde_json::to_value(&report).unwrap();
    assert!(v["outcome"]["unresolved"].is_string());
}

#[test]
fn diagnostic_lines_render_with_phase_prefixes() {
    let report = repair(r#"{"a": "unclosed"#, &opts());
    assert!(
        report
            .diagnostic_lines()
            .all(|l| l.starts_with("pre:") || l.starts_with("pass"))
    );
}
