//! Structural validation of a [`QuizResult`].
//!
//! Validation never fails: it returns zero or more [`ValidationIssue`]s, one
//! per violation. Issues are advisory. The generation use case logs them and
//! still hands the full result to the caller, leaving the decision of what is
//! usable to the reviewer.
//!
//! # Examples
//!
//! ```
//! use docquiz_domain::quiz::{validate, QuizResult, GeneratedQuestion, Difficulty};
//!
//! let q = GeneratedQuestion::single(1, "2+2?", ["3", "4", "5", "6"], "B", Difficulty::Easy);
//! let issues = validate(&QuizResult::new(vec![q]));
//! assert!(issues.is_empty());
//! ```

use super::answer_type::AnswerType;
use super::question::{CorrectAnswer, GeneratedQuestion, OPTION_KEYS};
use super::result::QuizResult;
use std::collections::BTreeSet;

/// Identifies a specific validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The result contains no questions at all.
    NoQuestions,
    /// A required field is absent or empty.
    MissingField(&'static str),
    /// `options` does not contain exactly four entries.
    OptionCount,
    /// `options` has four entries but the keys are not `A`..`D`.
    OptionKeys,
    /// `correct_answer` references a key not present in `options`.
    UnknownAnswerKey,
    /// `correct_answer` shape disagrees with the declared `answer_type`.
    AnswerShape,
}

/// A detected violation, tagged with the 1-based question index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub question_index: Option<usize>,
    pub kind: IssueKind,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.question_index {
            Some(index) => write!(f, "Q{}: {}", index, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Validate every question in `result`.
pub fn validate(result: &QuizResult) -> Vec<ValidationIssue> {
    if result.questions.is_empty() {
        return vec![ValidationIssue {
            question_index: None,
            kind: IssueKind::NoQuestions,
            message: "Result contains no questions".to_string(),
        }];
    }

    result
        .questions
        .iter()
        .enumerate()
        .flat_map(|(i, q)| validate_question(i + 1, q))
        .collect()
}

/// Validate a single question; `index` is 1-based and only used for tagging.
pub fn validate_question(index: usize, question: &GeneratedQuestion) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |kind: IssueKind, message: String| {
        issues.push(ValidationIssue {
            question_index: Some(index),
            kind,
            message,
        });
    };

    if question.question.as_deref().is_none_or(|s| s.trim().is_empty()) {
        push(IssueKind::MissingField("question"), "Missing 'question'".to_string());
    }

    let options = question.options.as_ref().filter(|o| !o.is_empty());
    match options {
        None => push(IssueKind::MissingField("options"), "Missing 'options'".to_string()),
        Some(options) if options.len() != OPTION_KEYS.len() => push(
            IssueKind::OptionCount,
            format!("Must have exactly 4 options (found {})", options.len()),
        ),
        Some(options) => {
            let keys: BTreeSet<&str> = options.keys().map(String::as_str).collect();
            let expected: BTreeSet<&str> = OPTION_KEYS.into_iter().collect();
            if keys != expected {
                push(
                    IssueKind::OptionKeys,
                    format!(
                        "Options must be keyed A, B, C, D (found {})",
                        keys.into_iter().collect::<Vec<_>>().join(", ")
                    ),
                );
            }
        }
    }

    match question.correct_answer.as_ref().filter(|a| !a.is_empty()) {
        None => push(
            IssueKind::MissingField("correct_answer"),
            "Missing 'correct_answer'".to_string(),
        ),
        Some(answer) => {
            if let Some(options) = options {
                for key in answer.keys() {
                    if !options.contains_key(key) {
                        push(
                            IssueKind::UnknownAnswerKey,
                            format!("Correct answer '{}' not in options", key),
                        );
                    }
                }
            }
            if let Some(declared) = question.answer_type.as_deref().and_then(|s| s.parse().ok()) {
                check_shape(declared, answer, &mut push);
            }
        }
    }

    if question.difficulty.as_deref().is_none_or(|s| s.trim().is_empty()) {
        push(IssueKind::MissingField("difficulty"), "Missing 'difficulty'".to_string());
    }

    issues
}

fn check_shape(declared: AnswerType, answer: &CorrectAnswer, push: &mut impl FnMut(IssueKind, String)) {
    let consistent = match declared {
        AnswerType::Single => !answer.is_multiple() || answer.keys().len() == 1,
        AnswerType::Multiple => answer.is_multiple(),
    };
    if !consistent {
        push(
            IssueKind::AnswerShape,
            format!(
                "answer_type '{}' does not match correct_answer '{}'",
                declared, answer
            ),
        );
    }
}
