use crate::document::{DocumentFormat, DocumentStructure};
use std::path::Path;

/// Core trait that all document extractors must implement
pub trait Extractor {
    /// Read the document at `path` and detect its form fields
    fn extract(&self, path: &Path) -> Result<DocumentStructure, ExtractionError>;

    /// Which document format does this extractor handle?
    fn format(&self) -> DocumentFormat;

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::Io(err.to_string())
    }
}
