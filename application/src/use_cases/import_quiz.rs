//! Import quiz use case
//!
//! Hands reviewed questions to the [`QuestionStore`]. Questions are
//! re-validated first; invalid ones are counted as failed and never reach
//! the store.

use crate::ports::question_store::{ImportSummary, QuestionStore, StoreError};
use docquiz_domain::quiz::validate_question;
use docquiz_domain::{QuestionId, QuizResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort an import.
#[derive(Error, Debug)]
pub enum ImportQuizError {
    #[error("Category name must not be empty")]
    EmptyCategory,

    #[error("No questions selected for import")]
    NothingSelected,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case for importing reviewed questions into a category.
pub struct ImportQuizUseCase {
    store: Arc<dyn QuestionStore>,
}

impl ImportQuizUseCase {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Import `quiz` into `category`.
    ///
    /// When `selection` is given only those question ids are imported.
    pub async fn execute(
        &self,
        mut quiz: QuizResult,
        category: &str,
        selection: Option<&[QuestionId]>,
    ) -> Result<ImportSummary, ImportQuizError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ImportQuizError::EmptyCategory);
        }

        if let Some(ids) = selection {
            quiz.select(ids);
        }
        if quiz.is_empty() {
            return Err(ImportQuizError::NothingSelected);
        }

        let mut rejected = ImportSummary::default();
        let mut valid = Vec::with_capacity(quiz.questions.len());
        for (i, question) in quiz.questions.into_iter().enumerate() {
            let issues = validate_question(i + 1, &question);
            if issues.is_empty() {
                valid.push(question);
            } else {
                rejected.failed_count += 1;
                rejected
                    .errors
                    .extend(issues.iter().map(ToString::to_string));
            }
        }
        if rejected.failed_count > 0 {
            warn!(
                "{} questions failed validation and will not be imported",
                rejected.failed_count
            );
        }

        let summary = if valid.is_empty() {
            ImportSummary::default()
        } else {
            let batch = QuizResult {
                questions: valid,
                metadata: quiz.metadata,
            };
            self.store.save_validated_questions(&batch, category).await?
        };

        let summary = summary.merge(rejected);
        info!(
            "Imported {} questions into '{}' ({} failed)",
            summary.success_count, category, summary.failed_count
        );
        Ok(summary)
    }
}
