//! Error handling for the resume parser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ResumeParserError>;

/// Keyword automaton construction failures are configuration problems
impl From<aho_corasick::BuildError> for ResumeParserError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ResumeParserError::Configuration(format!("Failed to build keyword matcher: {}", err))
    }
}

/// A panicked or cancelled extraction task
impl From<tokio::task::JoinError> for ResumeParserError {
    fn from(err: tokio::task::JoinError) -> Self {
        ResumeParserError::Processing(format!("Extraction task failed: {}", err))
    }
}
