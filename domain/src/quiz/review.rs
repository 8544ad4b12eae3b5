//! Reviewer edits and selection applied to a generated quiz before import.

use super::question::{CorrectAnswer, OPTION_KEYS, QuestionId};
use super::result::QuizResult;
use std::collections::BTreeMap;

/// A single inline edit made by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEdit {
    Question(String),
    /// Replace the text of option `key` (one of `A`..`D`).
    Option { key: String, text: String },
    CorrectAnswer(CorrectAnswer),
    Explanation(String),
    Difficulty(String),
    Topic(String),
}

impl QuestionEdit {
    /// Build an edit from a field name and raw value.
    ///
    /// Recognized fields are `question`, `explanation`, `difficulty`, `topic`,
    /// `correct_answer` and the option keys `A`..`D`.
    pub fn from_field(field: &str, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        match field {
            "question" => Some(QuestionEdit::Question(value)),
            "explanation" => Some(QuestionEdit::Explanation(value)),
            "difficulty" => Some(QuestionEdit::Difficulty(value)),
            "topic" => Some(QuestionEdit::Topic(value)),
            "correct_answer" => Some(QuestionEdit::CorrectAnswer(CorrectAnswer::parse(&value))),
            key if OPTION_KEYS.contains(&key) => Some(QuestionEdit::Option {
                key: key.to_string(),
                text: value,
            }),
            _ => None,
        }
    }
}

impl QuizResult {
    /// Keep only the questions whose id is in `ids`, preserving order.
    pub fn select(&mut self, ids: &[QuestionId]) {
        self.questions
            .retain(|q| q.id.as_ref().is_some_and(|id| ids.contains(id)));
        self.metadata.total_questions = Some(self.questions.len() as u64);
    }

    /// Apply `edit` to the question with `id`. Returns `false` if no such question.
    pub fn apply_edit(&mut self, id: &QuestionId, edit: QuestionEdit) -> bool {
        let Some(question) = self.questions.iter_mut().find(|q| q.id.as_ref() == Some(id)) else {
            return false;
        };

        match edit {
            QuestionEdit::Question(text) => question.question = Some(text),
            QuestionEdit::Option { key, text } => {
                question
                    .options
                    .get_or_insert_with(BTreeMap::new)
                    .insert(key, text);
            }
            QuestionEdit::CorrectAnswer(answer) => question.correct_answer = Some(answer),
            QuestionEdit::Explanation(text) => question.explanation = Some(text),
            QuestionEdit::Difficulty(text) => question.difficulty = Some(text),
            QuestionEdit::Topic(text) => question.topic = Some(text),
        }
        true
    }
}
