//! Generation parameters: pipeline limits for quiz creation.
//!
//! [`GenerationParams`] groups the static parameters that control
//! [`CreateQuizUseCase`](crate::use_cases::create_quiz::CreateQuizUseCase).
//! These are application-layer concerns, not domain policy.

use docquiz_domain::ContextBudget;

/// Default number of sources extracted concurrently.
pub const DEFAULT_MAX_CONCURRENT_EXTRACTIONS: usize = 4;

/// Pipeline control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Character allowance for the assembled context.
    pub context_budget: ContextBudget,
    /// Maximum number of sources extracted at the same time.
    pub max_concurrent_extractions: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            context_budget: ContextBudget::default(),
            max_concurrent_extractions: DEFAULT_MAX_CONCURRENT_EXTRACTIONS,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_context_budget(mut self, budget: ContextBudget) -> Self {
        self.context_budget = budget;
        self
    }

    /// Set the extraction concurrency; zero is treated as one.
    pub fn with_max_concurrent_extractions(mut self, max: usize) -> Self {
        self.max_concurrent_extractions = max.max(1);
        self
    }
}
