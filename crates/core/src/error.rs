//! Error types for Sententia operations.
//!
//! This module defines the main error type [`SententiaError`] which covers
//! lexicon loading, article fetching and extraction, document analysis and
//! table I/O.
//!
//! # Example
//!
//! ```rust
//! use sententia_core::{SententiaError, Result};
//!
//! fn first_sentence(text: &str) -> Result<&str> {
//!     text.split('.')
//!         .next()
//!         .filter(|s| !s.trim().is_empty())
//!         .ok_or(SententiaError::EmptyDocument { sentences: 0, words: 0 })
//! }
//! # assert!(first_sentence("").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sententia.
///
/// Lexicon errors are fatal for a batch. Everything raised while fetching,
/// extracting or analyzing a single document only removes that document
/// from the metrics table.
#[derive(Error, Debug)]
pub enum SententiaError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page does not carry any of the article layouts we know how to read.
    #[error("Article content not found: {0}")]
    ContentNotFound(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A stop-word or master-dictionary source is missing.
    ///
    /// No default lexicon exists, so this aborts a batch before any
    /// document is processed.
    #[error("Lexicon source not found: {0}")]
    LexiconSourceNotFound(PathBuf),

    /// Standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reading or writing a CSV table failed.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Serializing metrics to an output format failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The document has no sentences or no words, so ratios are undefined.
    #[error("Document is empty ({sentences} sentences, {words} words)")]
    EmptyDocument { sentences: usize, words: usize },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A background extraction task panicked or was cancelled.
    #[error("Task failed: {0}")]
    TaskError(String),
}

impl From<serde_json::Error> for SententiaError {
    fn from(err: serde_json::Error) -> Self {
        SententiaError::SerializationError(err.to_string())
    }
}

/// Result type alias for SententiaError.
///
/// This is a convenience alias for `std::result::Result<T, SententiaError>`.
pub type Result<T> = std::result::Result<T, SententiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SententiaError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_empty_document_error() {
        let err = SententiaError::EmptyDocument { sentences: 0, words: 3 };
        assert!(err.to_string().contains("0 sentences"));
        assert!(err.to_string().contains("3 words"));
    }

    #[test]
    fn test_http_status_error() {
        let err = SententiaError::HttpStatus { status: 404, url: "https://example.com/a".to_string() };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("https://example.com/a"));
    }

    #[test]
    fn test_lexicon_source_error() {
        let err = SententiaError::LexiconSourceNotFound(PathBuf::from("StopWords"));
        assert!(err.to_string().contains("StopWords"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SententiaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SententiaError::SerializationError(_)));
    }
}
