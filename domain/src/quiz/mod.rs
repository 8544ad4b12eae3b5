//! Quiz domain: quotas, generated questions, results, validation and review.

pub mod answer_type;
pub mod difficulty;
mod lenient;
pub mod question;
pub mod result;
pub mod review;
pub mod validation;

pub use answer_type::{AnswerType, AnswerTypeConfig};
pub use difficulty::{Difficulty, DifficultyMix};
pub use question::{CorrectAnswer, GeneratedQuestion, OPTION_KEYS, QuestionId};
pub use result::{PRIMARY_DOCUMENTS_SOURCE_TYPE, QuizMetadata, QuizResult};
pub use review::QuestionEdit;
pub use validation::{IssueKind, ValidationIssue, validate, validate_question};
