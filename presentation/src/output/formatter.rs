//! Output formatter trait

use docquiz_application::CreateQuizOutput;

/// Trait for formatting generated quizzes
pub trait OutputFormatter {
    /// Human-readable listing with sources, skips and validation notes
    fn format_summary(&self, output: &CreateQuizOutput) -> String;

    /// The quiz itself as JSON
    fn format_json(&self, output: &CreateQuizOutput) -> String;
}
