//! Progress notification port
//!
//! Defines the interface for reporting progress during quiz generation.

/// Callback for progress updates during quiz generation
///
/// Implementations live in the presentation layer. All methods have empty
/// default implementations, so only the interesting callbacks need to be
/// implemented.
pub trait GenerationProgressNotifier: Send + Sync {
    /// Called before extraction starts with the number of sources.
    fn on_extraction_start(&self, _total: usize) {}

    /// Called when one source has been extracted or skipped.
    fn on_source_done(&self, _label: &str, _success: bool) {}

    /// Called when the prompt is about to be sent.
    fn on_generation_start(&self, _prompt_chars: usize) {}

    /// Called when the model reply has been decoded and validated.
    fn on_generation_complete(&self, _question_count: usize, _issue_count: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgressNotifier for NoProgress {}
