//! Generation configuration from TOML (`[generation]` section)

use docquiz_application::GenerationParams;
use docquiz_application::config::generation_params::DEFAULT_MAX_CONCURRENT_EXTRACTIONS;
use docquiz_domain::ConfigIssue;
use docquiz_domain::ContextBudget;
use serde::{Deserialize, Serialize};

/// Question count used when the command line does not give one.
pub const DEFAULT_QUESTION_COUNT: u32 = 20;

/// Raw generation configuration from TOML.
///
/// # Example
///
/// ```toml
/// [generation]
/// default_questions = 20
/// max_input_tokens = 1900000
/// chars_per_token = 4
/// max_concurrent_extractions = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub default_questions: u32,
    /// Input-token allowance for the assembled context.
    pub max_input_tokens: usize,
    pub chars_per_token: usize,
    pub max_concurrent_extractions: usize,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let budget = ContextBudget::default();
        Self {
            default_questions: DEFAULT_QUESTION_COUNT,
            max_input_tokens: budget.max_input_tokens(),
            chars_per_token: budget.chars_per_token(),
            max_concurrent_extractions: DEFAULT_MAX_CONCURRENT_EXTRACTIONS,
        }
    }
}

impl FileGenerationConfig {
    /// Convert to [`GenerationParams`], returning validation issues.
    ///
    /// Values that violate constraints fall back to their defaults.
    pub fn to_params(&self) -> (GenerationParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let budget = match ContextBudget::try_new(self.max_input_tokens, self.chars_per_token) {
            Ok(budget) => budget,
            Err(errors) => {
                issues.extend(errors.into_iter().map(|msg| {
                    let msg = msg.trim_start_matches("context_budget: ");
                    ConfigIssue::warning("generation", format!("{}, using the default budget", msg))
                }));
                ContextBudget::default()
            }
        };

        let workers = if self.max_concurrent_extractions == 0 {
            issues.push(ConfigIssue::warning(
                "generation.max_concurrent_extractions",
                format!(
                    "must be at least 1, using {}",
                    DEFAULT_MAX_CONCURRENT_EXTRACTIONS
                ),
            ));
            DEFAULT_MAX_CONCURRENT_EXTRACTIONS
        } else {
            self.max_concurrent_extractions
        };

        let params = GenerationParams::default()
            .with_context_budget(budget)
            .with_max_concurrent_extractions(workers);
        (params, issues)
    }

    /// Question count to use when none is requested explicitly.
    pub fn question_count(&self) -> (u32, Option<ConfigIssue>) {
        if self.default_questions == 0 {
            (
                DEFAULT_QUESTION_COUNT,
                Some(ConfigIssue::warning(
                    "generation.default_questions",
                    format!("must be at least 1, using {}", DEFAULT_QUESTION_COUNT),
                )),
            )
        } else {
            (self.default_questions, None)
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_params().1;
        issues.extend(self.question_count().1);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileGenerationConfig::default();
        assert!(config.validate().is_empty());
        let (params, _) = config.to_params();
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_zero_values_fall_back_with_warnings() {
        let config = FileGenerationConfig {
            default_questions: 0,
            max_input_tokens: 0,
            chars_per_token: 0,
            max_concurrent_extractions: 0,
        };
        let (params, issues) = config.to_params();
        assert_eq!(params, GenerationParams::default());
        assert_eq!(issues.len(), 3);
        assert_eq!(config.question_count().0, DEFAULT_QUESTION_COUNT);
        assert_eq!(config.validate().len(), 4);
    }

    #[test]
    fn test_custom_budget() {
        let config = FileGenerationConfig {
            max_input_tokens: 1000,
            chars_per_token: 2,
            max_concurrent_extractions: 8,
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert!(issues.is_empty());
        assert_eq!(params.context_budget.max_chars(), 2000);
        assert_eq!(params.max_concurrent_extractions, 8);
    }
}
