//! Document extractor port
//!
//! Defines the interface for turning a [`SourceDocument`] into plain text.

use async_trait::async_trait;
use docquiz_domain::SourceDocument;
use thiserror::Error;

/// Errors that can occur while extracting one document.
///
/// All variants are per-document: the generation use case logs them and
/// skips the document instead of failing the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Cannot read {location}: {reason}")]
    Unreadable { location: String, reason: String },

    #[error("Invalid page range {range} for {location}: {reason}")]
    InvalidRange {
        location: String,
        range: String,
        reason: String,
    },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Unsupported source: {0}")]
    Unsupported(String),

    #[error("No text could be extracted from {0}")]
    Empty(String),
}

impl ExtractionError {
    pub fn unreadable(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Unreadable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Extracts plain text from PDF, DOCX, PPTX files and web pages.
///
/// Implementations live in the infrastructure layer. A successful result is
/// expected to be non-empty; implementations return
/// [`ExtractionError::Empty`] rather than an empty string.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, document: &SourceDocument) -> Result<String, ExtractionError>;
}
