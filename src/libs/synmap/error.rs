use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynmapError {
    /// A link-table line could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown strand symbol: {0:?}")]
    Strand(String),

    #[error("No links to build a synteny map from")]
    Empty,

    /// A pass was called before the passes it depends on
    #[error("Structural precondition violated: {0}")]
    Precondition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
