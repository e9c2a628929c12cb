use super::*;

#[test]
fn unquoted_key_inside_nested_object() {
    let v = repaired_value(r#"{ "u": { name: "Z", "age": 25 } }"#);
    assert_eq!(v["u"]["name"], "Z");
    assert_eq!(v["u"]["age"], 25);
}

#[test]
fn missing_comma_between_array_objects() {
    let v = repaired_value(r#"{ "a": [ {"x":1} {"x":2} ] }"#);
    let a = v["a"].as_array().unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a[0]["x"], 1);
    assert_eq!(a[1]["x"], 2);
}

#[test]
fn trailing_commas_and_python_booleans() {
    let v = repaired_value(r#"{ "on": True, "off": false, "vals": [1,2,], }"#);
    assert_eq!(v["on"], true);
    assert_eq!(v["off"], false);
    assert_eq!(v["vals"], serde_json::json!([1, 2]));
}

#[test]
fn duplicate_key_keeps_last_value() {
    let v = repaired_value(r#"{ "v": 1, "v": 2 }"#);
    assert_eq!(v, serde_json::json!({ "v": 2 }));
}

#[test]
fn uppercase_null_and_line_comment() {
    let v = repaired_value("{ \"a\": null, \"b\": NULL // note\n }");
    assert_eq!(v["a"], serde_json::Value::Null);
    assert_eq!(v["b"], serde_json::Value::Null);
}

#[test]
fn stringified_object_value_with_lost_escaping() {
    let v = repaired_value(r#"{ "status":"ok", "result":"{ "rows": 2 }" }"#);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["result"]["rows"], 2);
}

#[test]
fn stringified_value_repair_leaves_a_trail() {
    let report = repair(r#"{ "status":"ok", "result":"{ "rows": 2 }" }"#, &opts());
    assert!(report.outcome.is_parsed());
    assert!(
        report
            .diagnostic_lines()
            .any(|l| l.starts_with("pre:") && l.contains("stringified"))
    );
}

#[test]
fn stray_quote_after_number() {
    let v = repaired_value(r#"{"amount": 1200.50", "flag": true}"#);
    assert_eq!(v["amount"], 1200.50);
    assert_eq!(v["flag"], true);
}

#[test]
fn missing_value_becomes_null() {
    let v = repaired_value(r#"{"a": , "b": 1}"#);
    assert_eq!(v["a"], serde_json::Value::Null);
    assert_eq!(v["b"], 1);
}

#[test]
fn unterminated_string_is_closed_and_object_balanced() {
    let report = repair(r#"{"a": "unclosed"#, &opts());
    assert!(report.outcome.is_parsed());
    let v: serde_json::Value = serde_json::from_str(report.outcome.canonical().unwrap()).unwrap();
    assert_eq!(v["a"], "unclosed");
    assert!(report.diagnostic_lines().any(|l| l.contains("Appended")));
}

#[test]
fn raw_newline_inside_string_is_escaped() {
    let v = repaired_value("{\"a\": \"line1\nline2\"}");
    assert_eq!(v["a"], "line1\nline2");
}

#[test]
fn garbage_after_document_is_truncated() {
    let v = repaired_value(r#"{"a": 1} trailing words"#);
    assert_eq!(v, serde_json::json!({ "a": 1 }));
}

#[test]
fn truncated_object_is_closed() {
    let v = repaired_value(r#"{"a": {"b": [1, 2"#);
    assert_eq!(v["a"]["b"], serde_json::json!([1, 2]));
}
