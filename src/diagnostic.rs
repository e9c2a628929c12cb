use std::fmt;

use serde::{Serialize, Serializer};

/// Pipeline phase a diagnostic was recorded in.
///
/// `Pre` covers the one-shot pre-normalization stage; `Pass(n)` covers the
/// n-th main pass (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pre,
    Pass(u32),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Pre => write!(f, "pre"),
            Phase::Pass(n) => write!(f, "pass{}", n),
        }
    }
}

/// One entry of the repair trail: a phase tag plus a human-readable message.
///
/// Diagnostics are for operator inspection; callers must not parse them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.phase, self.message)
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Append-only diagnostic accumulator carried through the pipeline.
///
/// The current phase is set by the driver; transforms only append messages.
#[derive(Debug, Default)]
pub(crate) struct Trail {
    phase: Option<Phase>,
    entries: Vec<Diagnostic>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = Some(phase);
    }

    pub(crate) fn note(&mut self, message: impl Into<String>) {
        let phase = self.phase.unwrap_or(Phase::Pre);
        self.entries.push(Diagnostic {
            phase,
            message: message.into(),
        });
    }

    pub(crate) fn extend(&mut self, entries: Vec<Diagnostic>) {
        self.entries.extend(entries);
    }

    pub(crate) fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
