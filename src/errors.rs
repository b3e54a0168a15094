use thiserror::Error;

/// error types for loading mechanisms and querying reaction networks
#[derive(Debug, Error)]
pub enum CrnError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File '{0}' does not exist")]
    FileNotFound(String),
    #[error("No '{section}' section found in '{file}'")]
    MissingSection { section: String, file: String },
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Invalid equation: {0}")]
    Equation(String),
    #[error("Species '{0}' not found in the network")]
    SpeciesNotFound(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
