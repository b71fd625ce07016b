// Error kinds surfaced by the load pipeline
use thiserror::Error;

/// A row whose fields do not match the expected lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid timestamp {text:?}, expected dd.mm.yyyy HH:MM:SS")]
    Timestamp { line: usize, text: String },

    #[error("line {line}: invalid BPM value {text:?}")]
    Value { line: usize, text: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Declared content type is present but not `application/*`
    #[error("unsupported content type {0:?}")]
    FormatRejected(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("file contains no samples")]
    EmptyInput,

    /// A newer upload was started before this one finished
    #[error("load superseded by a newer upload")]
    Superseded,

    #[error("chart renderer failed: {0}")]
    Render(#[source] anyhow::Error),
}
