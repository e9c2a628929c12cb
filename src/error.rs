use thiserror::Error;

/// Failure surfaced by the `Result`-returning convenience APIs and the CLI.
///
/// The core [`repair`](crate::repair) entry point is total and never returns
/// this; it reports an unrepairable input through
/// [`Outcome::Unresolved`](crate::Outcome::Unresolved) instead.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The text still failed strict parsing after every pass.
    #[error("still invalid JSON after {passes} pass(es): {message}")]
    Unresolved { passes: usize, message: String },

    /// I/O failure in the file/stdin layer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
