//! Question store port
//!
//! The persistence collaborator that receives validated questions.

use async_trait::async_trait;
use docquiz_domain::QuizResult;
use serde::Serialize;
use thiserror::Error;

/// Errors that prevent the store from saving anything at all.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid category name: {0:?}")]
    InvalidCategory(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of saving a batch of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Combine two summaries, keeping error order.
    pub fn merge(mut self, other: ImportSummary) -> Self {
        self.success_count += other.success_count;
        self.failed_count += other.failed_count;
        self.errors.extend(other.errors);
        self
    }
}

/// Saves questions into a named category.
///
/// Implementations report per-question failures inside the
/// [`ImportSummary`]; an `Err` means the batch could not be attempted.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn save_validated_questions(
        &self,
        quiz: &QuizResult,
        category: &str,
    ) -> Result<ImportSummary, StoreError>;
}
