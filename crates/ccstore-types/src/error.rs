use thiserror::Error;

/// Errors produced while loading store descriptions.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("failed to parse store description: {0}")]
    Parse(String),

    #[error("unsupported description format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
