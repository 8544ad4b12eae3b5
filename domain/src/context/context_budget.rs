//! Context budget for bounding the assembled prompt context.
//!
//! [`ContextBudget`] expresses the model's input allowance in tokens and
//! converts it to a character cap using a fixed chars-per-token estimate.
//! The default leaves headroom below the model's context window for the
//! prompt template and the expected response.

use serde::{Deserialize, Serialize};

/// Default input-token allowance for the assembled context.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 1_900_000;

/// Default characters-per-token estimate.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Budget controlling how large the assembled context may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    max_input_tokens: usize,
    chars_per_token: usize,
}

impl ContextBudget {
    /// Create a new budget with explicit values.
    pub fn new(max_input_tokens: usize, chars_per_token: usize) -> Self {
        Self {
            max_input_tokens,
            chars_per_token,
        }
    }

    /// Create a validated budget, returning every violated rule on failure.
    pub fn try_new(max_input_tokens: usize, chars_per_token: usize) -> Result<Self, Vec<String>> {
        let budget = Self::new(max_input_tokens, chars_per_token);
        let issues = budget.validate();
        if issues.is_empty() {
            Ok(budget)
        } else {
            Err(issues)
        }
    }

    /// A budget given directly as a character cap (one char per "token").
    pub fn from_chars(max_chars: usize) -> Self {
        Self::new(max_chars, 1)
    }

    // ==================== Accessors ====================

    pub fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }

    pub fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }

    /// Character cap for the assembled context.
    pub fn max_chars(&self) -> usize {
        self.max_input_tokens.saturating_mul(self.chars_per_token)
    }

    // ==================== Builder Methods ====================

    pub fn with_max_input_tokens(mut self, tokens: usize) -> Self {
        self.max_input_tokens = tokens;
        self
    }

    pub fn with_chars_per_token(mut self, chars: usize) -> Self {
        self.chars_per_token = chars;
        self
    }

    // ==================== Validation ====================

    /// Validate this budget, returning a list of issues.
    ///
    /// Rules:
    /// - `max_input_tokens >= 1`
    /// - `chars_per_token >= 1`
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.max_input_tokens < 1 {
            issues.push("context_budget: max_input_tokens must be >= 1".to_string());
        }
        if self.chars_per_token < 1 {
            issues.push("context_budget: chars_per_token must be >= 1".to_string());
        }
        issues
    }
}

impl Default for ContextBudget {
    /// Default: 1.9M tokens at 4 chars/token.
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_TOKENS, DEFAULT_CHARS_PER_TOKEN)
    }
}
