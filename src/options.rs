/// Tuning knobs for the repair pipeline.
#[derive(Clone, Debug)]
pub struct Options {
    /// Maximum number of main transform passes before giving up.
    pub max_passes: usize,
    /// Strip `/* … */` and `// …` comments found outside string literals.
    pub strip_comments: bool,
    /// Normalize `True`/`False`/`NULL` to their JSON spellings outside
    /// string literals.
    pub normalize_literals: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_passes: 6,
            strip_comments: true,
            normalize_literals: true,
        }
    }
}
