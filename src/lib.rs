//! Repair near-JSON text into strict JSON.
//!
//! Hand-edited configs, truncated logs, LLM output and copy-pasted payloads
//! are often *almost* JSON: unquoted keys, trailing commas, Python literal
//! casing, missing separators, unclosed strings or brackets, stray quotes.
//! This crate runs an ordered pipeline of string-literal-aware text
//! transforms in a bounded fix-point loop, attempting a strict parse after
//! every pass, and hands back either a canonically re-serialized document or
//! the best-effort text plus the last parse error, always with a diagnostic
//! trail of the repairs it made.
//!
//! The repairs never touch the inside of string literals (URLs, Windows
//! paths and `// not a comment` payloads survive), with one exception: raw
//! newlines inside an unclosed literal are escaped while closing it.
//!
//! Duplicate keys collapse to their last occurrence, matching strict JSON
//! parsers; callers that need merge semantics must post-process.

mod diagnostic;
mod driver;
mod error;
mod options;
mod parse;
mod scanner;
mod transforms;

pub mod cli;

pub use diagnostic::{Diagnostic, Phase};
pub use error::RepairError;
pub use options::Options;

use serde::Serialize;
use std::io::Write;

/// Final verdict of a repair invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Strict parsing succeeded; carries the canonical re-serialization
    /// (two-space indent, insertion-ordered keys, non-ASCII kept literal).
    Parsed(String),
    /// Strict parsing still failed after every pass; carries the last parse
    /// error message.
    Unresolved(String),
}

impl Outcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Outcome::Parsed(_))
    }

    /// The canonical document, when parsing succeeded.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Outcome::Parsed(s) => Some(s),
            Outcome::Unresolved(_) => None,
        }
    }

    /// The last parse error, when it did not.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Parsed(_) => None,
            Outcome::Unresolved(e) => Some(e),
        }
    }
}

/// Everything a repair invocation produced: the final text (strict parsing
/// was last attempted on exactly this text), the outcome, and the trail.
#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub repaired: String,
    pub outcome: Outcome,
    pub diagnostics: Vec<Diagnostic>,
}

impl RepairReport {
    /// The diagnostics rendered one per line, `pre:`/`passN:` prefixed.
    pub fn diagnostic_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(|d| d.to_string())
    }
}

/// Repair a near-JSON text. Total: never fails, never panics on hostile
/// input; an unrepairable text comes back as [`Outcome::Unresolved`]
/// together with the best-effort repaired text.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair};
///
/// let report = repair(r#"{ status: "ok", retries: 3, }"#, &Options::default());
/// assert!(report.outcome.is_parsed());
/// assert!(report.diagnostics.iter().any(|d| d.to_string().starts_with("pass1:")));
/// ```
pub fn repair(input: &str, opts: &Options) -> RepairReport {
    driver::run(input, opts)
}

/// Repair and return the canonical JSON text, or a
/// [`RepairError::Unresolved`] carrying the last parse error.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair_to_string};
///
/// let canonical = repair_to_string("{\"on\": True,}", &Options::default())?;
/// assert_eq!(canonical, "{\n  \"on\": true\n}");
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn repair_to_string(input: &str, opts: &Options) -> Result<String, RepairError> {
    let report = repair(input, opts);
    match report.outcome {
        Outcome::Parsed(canonical) => Ok(canonical),
        Outcome::Unresolved(message) => Err(RepairError::Unresolved {
            passes: opts.max_passes,
            message,
        }),
    }
}

/// Repair and write the canonical JSON text into an `io::Write`.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair_to_writer};
///
/// let mut out = Vec::new();
/// repair_to_writer("[1, 2, 3,]", &Options::default(), &mut out)?;
/// assert_eq!(out, b"[\n  1,\n  2,\n  3\n]");
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn repair_to_writer<W: Write>(
    input: &str,
    opts: &Options,
    writer: &mut W,
) -> Result<(), RepairError> {
    let s = repair_to_string(input, opts)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

/// Repair and parse into a `serde_json::Value`, Python `json.loads` style.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, loads};
///
/// let v = loads(r#"{ count: 2 } // tally"#, &Options::default())?;
/// assert_eq!(v["count"], 2);
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn loads(input: &str, opts: &Options) -> Result<serde_json::Value, RepairError> {
    let s = repair_to_string(input, opts)?;
    serde_json::from_str(&s).map_err(|e| RepairError::Unresolved {
        passes: opts.max_passes,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests;
