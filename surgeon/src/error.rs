//! Error types surfaced by the patch engine.
//!
//! Every failure is reported before any text is produced, so a caller that
//! only writes on `Ok` can never persist a half-patched document.

/// The source text is not valid markup for the selected dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    pub message: String,
}

impl ParseError {
    /// Build an error for `offset`, resolving its line and column in `source`.
    #[must_use]
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before.get(line_start..).map_or(0, |s| s.chars().count()) + 1;
        Self { offset, line, column, message: message.into() }
    }
}

/// Failure of a single `apply` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("no element carries {attribute}=\"{id}\"")]
    NotFound { attribute: String, id: String },
    #[error("{count} elements carry {attribute}=\"{id}\"; identifiers must be unique")]
    AmbiguousTarget { attribute: String, id: String, count: usize },
    #[error("source could not be parsed: {0}")]
    Parse(#[from] ParseError),
}

impl PatchError {
    /// Grepable error code carried in transport responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::AmbiguousTarget { .. } => "E_AMBIGUOUS_TARGET",
            Self::Parse(_) => "E_PARSE",
        }
    }
}
