use super::*;

use crate::diagnostic::Trail;
use crate::transforms::strings;

fn run<'t, F>(f: F, text: &'t str) -> String
where
    F: Fn(&'t str, &mut Trail) -> std::borrow::Cow<'t, str>,
{
    let mut trail = Trail::new();
    f(text, &mut trail).into_owned()
}

#[test]
fn stringified_object_value_is_promoted() {
    let out = run(
        strings::promote_stringified_values,
        r#"{ "result":"{ "rows": 2 }" }"#,
    );
    assert_eq!(out, r#"{ "result":{ "rows": 2 } }"#);
}

#[test]
fn stringified_array_value_is_promoted() {
    let out = run(
        strings::promote_stringified_values,
        r#"{"data":"[ "a", "b" ]"}"#,
    );
    assert_eq!(out, r#"{"data":[ "a", "b" ]}"#);
}

#[test]
fn properly_escaped_stringified_value_is_left_quoted() {
    let input = r#"{"blob": "{ \"a\": 1 }"}"#;
    assert_eq!(run(strings::promote_stringified_values, input), input);
}

#[test]
fn stray_quote_after_integer_before_comma() {
    let out = run(
        strings::remove_stray_quotes_after_numbers,
        r#"{"n": 42", "m": 7}"#,
    );
    assert_eq!(out, r#"{"n": 42, "m": 7}"#);
}

#[test]
fn stray_quote_after_float_before_brace() {
    let out = run(
        strings::remove_stray_quotes_after_numbers,
        r#"{"amount": 1200.50" }"#,
    );
    assert_eq!(out, r#"{"amount": 1200.50 }"#);
}

#[test]
fn closing_quote_of_a_quoted_number_is_kept() {
    let input = r#"{"n": "123", "m": "45.6"}"#;
    assert_eq!(run(strings::remove_stray_quotes_after_numbers, input), input);
}

#[test]
fn quote_opening_a_real_string_after_a_number_is_kept() {
    // A missing comma, not a stray quote: the quote is followed by content.
    let input = r#"[1 "a"]"#;
    assert_eq!(run(strings::remove_stray_quotes_after_numbers, input), input);
}

#[test]
fn unterminated_string_gets_a_closing_quote() {
    let mut trail = Trail::new();
    let out = strings::fix_unclosed_strings(r#"{"a": "oops"#, &mut trail);
    assert_eq!(out, r#"{"a": "oops""#);
}

#[test]
fn raw_newline_inside_string_is_escaped_in_place() {
    let out = run(strings::fix_unclosed_strings, "{\"a\": \"x\ny\"}");
    assert_eq!(out, "{\"a\": \"x\\ny\"}");
}

#[test]
fn dangling_backslash_at_end_is_dropped() {
    let out = run(strings::fix_unclosed_strings, "{\"a\": \"x\\");
    assert_eq!(out, "{\"a\": \"x\"");
}

#[test]
fn escaped_quotes_do_not_confuse_the_state_machine() {
    let input = r#"{"a": "he said \"hi\""}"#;
    assert_eq!(run(strings::fix_unclosed_strings, input), input);
}

#[test]
fn newlines_outside_strings_are_untouched() {
    let input = "{\n  \"a\": 1\n}";
    assert_eq!(run(strings::fix_unclosed_strings, input), input);
}
