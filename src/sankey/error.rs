use thiserror::Error;

/// Errors that can occur while turning an upload into a diagram
///
/// Malformed rows are not errors: the cleaner drops them and counts them in
/// its report.
#[derive(Debug, Error)]
pub enum SankeyError {
    /// Input is not parseable delimited text (or is empty)
    #[error("Load error: {0}")]
    Load(String),

    /// DataFrame error raised while reading or accessing columns
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from the header
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Reading the upload or writing the artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Figure serialization or config parsing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML page template failed to register or render
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error (malformed config file, bad property value)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using SankeyError
pub type Result<T> = std::result::Result<T, SankeyError>;
