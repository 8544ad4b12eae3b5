//! Generated multiple-choice questions.
//!
//! Fields are deliberately lenient (optional, free-form strings where the
//! model may drift) so that a slightly off reply still decodes and the
//! validator can report what is wrong instead of the whole result being lost.

use super::answer_type::AnswerType;
use super::difficulty::Difficulty;
use super::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The option keys every question must use.
pub const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

/// Question identifier as emitted by the model (usually a number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Number(n)
    }
}

/// Correct answer: one option key, or a set of keys for multiple-answer items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// Every option key referenced by this answer.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            CorrectAnswer::Single(key) => vec![key.as_str()],
            CorrectAnswer::Multiple(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, CorrectAnswer::Multiple(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Single(key) => key.trim().is_empty(),
            CorrectAnswer::Multiple(keys) => keys.is_empty(),
        }
    }

    /// Parse reviewer input such as `"B"` or `"A, C"`.
    pub fn parse(input: &str) -> Self {
        let keys: Vec<String> = input
            .split(',')
            .map(|k| k.trim().to_ascii_uppercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.len() == 1 {
            CorrectAnswer::Single(keys[0].clone())
        } else {
            CorrectAnswer::Multiple(keys)
        }
    }
}

impl std::fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectAnswer::Single(key) => write!(f, "{}", key),
            CorrectAnswer::Multiple(keys) => write!(f, "{}", keys.join(", ")),
        }
    }
}

/// One generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<QuestionId>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub question: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::options",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(
        default,
        deserialize_with = "lenient::correct_answer",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
}

impl GeneratedQuestion {
    /// Build a well-formed single-answer question.
    pub fn single(
        id: u64,
        question: impl Into<String>,
        options: [&str; 4],
        correct: &str,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: Some(QuestionId::Number(id)),
            question: Some(question.into()),
            options: Some(
                OPTION_KEYS
                    .iter()
                    .zip(options)
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            correct_answer: Some(CorrectAnswer::Single(correct.to_string())),
            answer_type: Some(AnswerType::Single.to_string()),
            difficulty: Some(difficulty.to_string()),
            ..Default::default()
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Declared answer type, falling back to the shape of `correct_answer`.
    pub fn resolved_answer_type(&self) -> AnswerType {
        if let Some(parsed) = self.answer_type.as_deref().and_then(|s| s.parse().ok()) {
            return parsed;
        }
        match &self.correct_answer {
            Some(answer) if answer.is_multiple() => AnswerType::Multiple,
            _ => AnswerType::Single,
        }
    }

    /// Parsed difficulty, if the model emitted a recognizable one.
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        self.difficulty.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.as_ref()?.get(key).map(String::as_str)
    }

    /// Whether option `key` is one of the correct answers.
    pub fn is_correct(&self, key: &str) -> bool {
        self.correct_answer
            .as_ref()
            .is_some_and(|answer| answer.keys().contains(&key))
    }
}
