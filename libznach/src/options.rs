//! Parser configuration.

/// How deeply lists, dictionaries and objects may nest by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for [`parse_with_options`](crate::parse_with_options).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name reported in error locations.
    pub filename: Option<String>,
    /// Deepest allowed nesting of compound values.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filename: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
