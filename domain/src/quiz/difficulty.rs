//! Difficulty levels and the per-call difficulty quota.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Easy/medium/hard question-count quota for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DifficultyMix {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyMix {
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    /// Default 25/50/25 split of `count`.
    ///
    /// Easy and medium are rounded (half up); hard takes the remainder so the
    /// three buckets always sum to exactly `count`.
    pub fn default_for(count: u32) -> Self {
        let easy = count / 4 + u32::from(count % 4 >= 2);
        let medium = count.div_ceil(2).min(count - easy);
        Self {
            easy,
            medium,
            hard: count - easy - medium,
        }
    }

    /// Convert percentages into counts for `count` questions.
    ///
    /// Each percentage must be within 0..=100 and the three must sum to 100.
    /// Easy and medium are rounded to the nearest count; hard absorbs the
    /// remainder so the total is always exact.
    pub fn from_percentages(
        count: u32,
        easy_pct: u32,
        medium_pct: u32,
        hard_pct: u32,
    ) -> Result<Self, DomainError> {
        for (name, pct) in [("easy", easy_pct), ("medium", medium_pct), ("hard", hard_pct)] {
            if pct > 100 {
                return Err(DomainError::InvalidPercentages(format!(
                    "{} percentage must be between 0 and 100 (got {})",
                    name, pct
                )));
            }
        }
        let total_pct = easy_pct + medium_pct + hard_pct;
        if total_pct != 100 {
            return Err(DomainError::InvalidPercentages(format!(
                "percentages must total 100 (currently: {})",
                total_pct
            )));
        }

        let easy = round_share(count, easy_pct).min(count);
        let medium = round_share(count, medium_pct).min(count - easy);
        Ok(Self {
            easy,
            medium,
            hard: count - easy - medium,
        })
    }

    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }

    /// Check that this mix covers exactly `expected` questions.
    pub fn ensure_total(&self, expected: u32) -> Result<(), DomainError> {
        if self.total() == expected {
            Ok(())
        } else {
            Err(DomainError::DifficultyMixMismatch {
                expected,
                actual: self.total(),
            })
        }
    }
}

/// `count * pct / 100`, rounded half up.
fn round_share(count: u32, pct: u32) -> u32 {
    let scaled = u64::from(count) * u64::from(pct);
    ((scaled + 50) / 100) as u32
}
