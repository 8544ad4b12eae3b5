//! Answer types and the single/multiple answer quota.

use super::difficulty::DifficultyMix;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a question has one correct option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    Single,
    Multiple,
}

impl AnswerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerType::Single => "single",
            AnswerType::Multiple => "multiple",
        }
    }
}

impl std::fmt::Display for AnswerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnswerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(AnswerType::Single),
            "multiple" => Ok(AnswerType::Multiple),
            other => Err(format!("unknown answer type '{}'", other)),
        }
    }
}

/// Quota of multiple-answer questions for one generation call.
///
/// When no config is supplied every generated question must be single-answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTypeConfig {
    multiple_count: u32,
    multiple_difficulty: DifficultyMix,
}

impl AnswerTypeConfig {
    /// Create a config whose difficulty split covers exactly `multiple_count`.
    pub fn new(multiple_count: u32, multiple_difficulty: DifficultyMix) -> Result<Self, DomainError> {
        if multiple_difficulty.total() != multiple_count {
            return Err(DomainError::InvalidAnswerTypeConfig(format!(
                "multiple-answer difficulty totals {} but multiple_count is {}",
                multiple_difficulty.total(),
                multiple_count
            )));
        }
        Ok(Self {
            multiple_count,
            multiple_difficulty,
        })
    }

    /// Multiple-answer quota with the default 25/50/25 difficulty split.
    pub fn with_default_difficulty(multiple_count: u32) -> Self {
        Self {
            multiple_count,
            multiple_difficulty: DifficultyMix::default_for(multiple_count),
        }
    }

    pub fn multiple_count(&self) -> u32 {
        self.multiple_count
    }

    pub fn multiple_difficulty(&self) -> DifficultyMix {
        self.multiple_difficulty
    }

    /// Number of single-answer questions out of `question_count`.
    pub fn single_count(&self, question_count: u32) -> u32 {
        question_count.saturating_sub(self.multiple_count)
    }

    /// Check the quota fits into `question_count` questions.
    pub fn ensure_fits(&self, question_count: u32) -> Result<(), DomainError> {
        if self.multiple_count > question_count {
            return Err(DomainError::InvalidAnswerTypeConfig(format!(
                "{} multiple-answer questions requested out of {}",
                self.multiple_count, question_count
            )));
        }
        Ok(())
    }
}
