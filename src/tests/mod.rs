use super::*;

// Shared helpers for the topic modules below.

fn opts() -> Options {
    Options::default()
}

fn repaired_value(input: &str) -> serde_json::Value {
    let report = repair(input, &opts());
    let canonical = report
        .outcome
        .canonical()
        .unwrap_or_else(|| panic!("expected Parsed outcome, got {:?}", report.outcome));
    serde_json::from_str(canonical).expect("canonical output must be strict JSON")
}

fn assert_unresolved(input: &str) -> RepairReport {
    let report = repair(input, &opts());
    assert!(
        !report.outcome.is_parsed(),
        "expected Unresolved for {input:?}, got {:?}",
        report.outcome
    );
    report
}

// Submodules (topic-based)
mod boundaries;
mod report_api;
mod scenarios;
mod transforms_strings;
