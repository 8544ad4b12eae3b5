//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid page range: pages {from}-{to}")]
    InvalidPageRange { from: u32, to: u32 },

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Question count must be at least 1")]
    InvalidQuestionCount,

    #[error("Difficulty mix totals {actual} but {expected} questions were requested")]
    DifficultyMixMismatch { expected: u32, actual: u32 },

    #[error("Invalid difficulty percentages: {0}")]
    InvalidPercentages(String),

    #[error("Invalid answer type config: {0}")]
    InvalidAnswerTypeConfig(String),

    #[error("No valid primary documents could be processed")]
    NoPrimaryContent,
}

impl DomainError {
    /// Check if this error means there was nothing to generate from
    pub fn is_no_primary_content(&self) -> bool {
        matches!(self, DomainError::NoPrimaryContent)
    }
}
