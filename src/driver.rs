//! The bounded fix-point loop that orders the transforms, attempts strict
//! parses, and steers error-guided recovery.
//!
//! Ordering: cheap normalizations first so they cannot feed false positives
//! to the structure-sensitive repairs; structural repairs before balancing so
//! balancing sees the true punctuation; balancing before error-guided
//! recovery so only genuinely unrecoverable defects reach the truncations.

use std::borrow::Cow;

use tracing::debug;

use crate::diagnostic::{Diagnostic, Phase, Trail};
use crate::options::Options;
use crate::parse::{canonicalize, strict_parse};
use crate::transforms::{
    BALANCE_BRACKETS, COLLAPSE_DUPLICATE_KEYS, FILL_MISSING_VALUES, FIX_UNCLOSED_STRINGS,
    INSERT_MISSING_COMMAS, NORMALIZE_LITERALS, PRE_STAGE, QUOTE_UNQUOTED_KEYS,
    REMOVE_TRAILING_COMMAS, STRIP_COMMENTS, Transform, brackets, guided, normalize, to_changed,
    truncate,
};
use crate::{Outcome, RepairReport};

pub(crate) fn run(input: &str, opts: &Options) -> RepairReport {
    let mut trail = Trail::new();
    trail.set_phase(Phase::Pre);

    let mut text = match normalize::normalize_line_endings(input) {
        Cow::Borrowed(_) => input.to_string(),
        Cow::Owned(s) => s,
    };

    // Fast path: strict input round-trips untouched, before any heuristic
    // gets a chance to misread it.
    if let Ok(value) = strict_parse(&text) {
        trail.note("parsed successfully without repairs");
        return report(text, Outcome::Parsed(canonicalize(&value)), trail);
    }

    for t in PRE_STAGE {
        text = apply(text, t, &mut trail);
    }

    let main_stage = main_stage(opts);

    for pass in 1..=opts.max_passes {
        let phase = Phase::Pass(pass as u32);
        trail.set_phase(phase);

        // Earlier passes may have exposed new structure for the pre-stage.
        for t in PRE_STAGE {
            text = apply(text, t, &mut trail);
        }
        for t in &main_stage {
            text = apply(text, t, &mut trail);
        }

        text = apply(text, &FIX_UNCLOSED_STRINGS, &mut trail);
        text = apply(text, &BALANCE_BRACKETS, &mut trail);

        let misplaced = to_changed(brackets::fix_misplaced_brackets(&text, &mut trail));
        if let Some(next) = misplaced {
            text = next;
            if let Some(next) = to_changed(brackets::strip_extra_brackets(&text, &mut trail)) {
                text = next;
            }
        }

        let failure = match strict_parse(&text) {
            Ok(value) => {
                trail.note("parsed successfully");
                return report(text, Outcome::Parsed(canonicalize(&value)), trail);
            }
            Err(failure) => failure,
        };
        trail.note(format!("still invalid JSON -> {failure}"));
        debug!(pass, error = %failure, "strict parse failed");

        // Error-position truncation, adopted only when it converges.
        if let Some(offset) = failure.offset() {
            if let Some(candidate) = truncate::truncate_at_error(&text, offset) {
                if let Some((fixed, canonical, notes)) = settle(candidate, phase) {
                    trail.note(format!("Truncated text at parse error offset {offset}"));
                    trail.extend(notes);
                    trail.note("parsed successfully after error-position truncation");
                    return report(fixed, Outcome::Parsed(canonical), trail);
                }
            }
        }

        // Garbage-tail truncation, same adopt-on-success rule.
        if let Some(candidate) = to_changed(truncate::truncate_garbage_tail(&text)) {
            if let Some((fixed, canonical, notes)) = settle(candidate, phase) {
                trail.note("Truncated trailing garbage after the last closing bracket");
                trail.extend(notes);
                trail.note("parsed successfully after garbage-tail truncation");
                return report(fixed, Outcome::Parsed(canonical), trail);
            }
        }

        // Error-guided insertion persists even when the re-parse fails: the
        // next pass continues from the edited text.
        if failure.expecting_comma() || failure.expecting_colon() {
            if let Some(fixed) = guided::insert_by_error(&text, &failure, &mut trail) {
                text = fixed;
                if let Ok(value) = strict_parse(&text) {
                    trail.note("parsed successfully after error-guided repair");
                    return report(text, Outcome::Parsed(canonicalize(&value)), trail);
                }
            }
        }
    }

    match strict_parse(&text) {
        Ok(value) => {
            trail.note("parsed successfully");
            report(text, Outcome::Parsed(canonicalize(&value)), trail)
        }
        Err(failure) => report(text, Outcome::Unresolved(failure.to_string()), trail),
    }
}

// T2..T5 ordering per pass; comment/literal steps honor the options.
fn main_stage(opts: &Options) -> Vec<&'static Transform> {
    let mut stage: Vec<&'static Transform> = Vec::with_capacity(7);
    if opts.strip_comments {
        stage.push(&STRIP_COMMENTS);
    }
    if opts.normalize_literals {
        stage.push(&NORMALIZE_LITERALS);
    }
    stage.push(&QUOTE_UNQUOTED_KEYS);
    stage.push(&COLLAPSE_DUPLICATE_KEYS);
    stage.push(&FILL_MISSING_VALUES);
    stage.push(&INSERT_MISSING_COMMAS);
    stage.push(&REMOVE_TRAILING_COMMAS);
    stage
}

fn apply(text: String, transform: &Transform, trail: &mut Trail) -> String {
    match to_changed((transform.run)(&text, trail)) {
        Some(next) => {
            debug!(transform = transform.name, "transform rewrote text");
            next
        }
        None => text,
    }
}

/// Re-run trailing-comma removal and balancing over a truncation candidate
/// and strict-parse it. Diagnostics stay on a scratch trail so a rejected
/// candidate leaves no trace of repairs that were rolled back.
fn settle(candidate: String, phase: Phase) -> Option<(String, String, Vec<Diagnostic>)> {
    let mut scratch = Trail::new();
    scratch.set_phase(phase);
    let mut text = apply(candidate, &REMOVE_TRAILING_COMMAS, &mut scratch);
    text = apply(text, &BALANCE_BRACKETS, &mut scratch);
    match strict_parse(&text) {
        Ok(value) => Some((text, canonicalize(&value), scratch.into_entries())),
        Err(_) => None,
    }
}

fn report(repaired: String, outcome: Outcome, trail: Trail) -> RepairReport {
    RepairReport {
        repaired,
        outcome,
        diagnostics: trail.into_entries(),
    }
}
