//! Console output formatter for generated quizzes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use docquiz_application::{CreateQuizOutput, ImportSummary};
use docquiz_domain::quiz::OPTION_KEYS;
use docquiz_domain::{AnswerType, ConfigIssue, GeneratedQuestion};

/// Formats quiz results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete generation outcome
    pub fn format(output: &CreateQuizOutput) -> String {
        let quiz = &output.quiz;
        let mut out = String::new();

        out.push_str(&Self::header("Generated Quiz"));
        out.push('\n');

        let meta = &quiz.metadata;
        out.push_str(&format!(
            "{} {} primary, {} supporting\n",
            "Sources:".cyan().bold(),
            meta.primary_count.unwrap_or(0),
            meta.supporting_count.unwrap_or(0)
        ));
        out.push_str(&format!(
            "{} {}\n",
            "Questions:".cyan().bold(),
            quiz.len()
        ));
        if let Some(generated_at) = &meta.generated_at {
            out.push_str(&format!("{} {}\n", "Generated:".cyan().bold(), generated_at));
        }
        if output.context_truncated {
            out.push_str(&format!(
                "{}\n",
                "Note: source text exceeded the context budget and was shortened".yellow()
            ));
        }

        if !output.skipped.is_empty() {
            out.push_str(&Self::section_header("Skipped Sources"));
            for skipped in &output.skipped {
                out.push_str(&format!("  {} {}: {}\n", "x".red(), skipped.label, skipped.error));
            }
        }

        out.push_str(&Self::section_header("Questions"));
        for (i, question) in quiz.questions.iter().enumerate() {
            out.push('\n');
            out.push_str(&Self::question(i + 1, question));
        }

        if !output.issues.is_empty() {
            out.push_str(&Self::section_header("Validation Issues"));
            for issue in &output.issues {
                out.push_str(&format!("  {} {}\n", "!".yellow().bold(), issue));
            }
        }

        out.push_str(&Self::footer());
        out
    }

    /// Turn off ANSI colors for everything formatted afterwards
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format as JSON
    pub fn format_json(output: &CreateQuizOutput) -> String {
        serde_json::to_string_pretty(&output.quiz).unwrap_or_else(|_| "{}".to_string())
    }

    fn question(number: usize, question: &GeneratedQuestion) -> String {
        let mut out = String::new();
        let id = question
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| number.to_string());

        let mut tags = Vec::new();
        if let Some(difficulty) = &question.difficulty {
            tags.push(difficulty.clone());
        }
        if question.resolved_answer_type() == AnswerType::Multiple {
            tags.push("multiple".to_string());
        }
        if let Some(topic) = &question.topic {
            tags.push(topic.clone());
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" {}", format!("[{}]", tags.join(", ")).dimmed())
        };

        out.push_str(&format!(
            "{}{}\n",
            format!("{}. {}", id, question.question.as_deref().unwrap_or("(missing question)")).bold(),
            tags
        ));
        for key in OPTION_KEYS {
            let Some(text) = question.option(key) else {
                continue;
            };
            if question.is_correct(key) {
                out.push_str(&format!("   {} {}) {}\n", "*".green().bold(), key, text.green()));
            } else {
                out.push_str(&format!("     {}) {}\n", key, text));
            }
        }
        if let Some(explanation) = &question.explanation {
            out.push_str(&format!("   {}\n", Self::indent(explanation, "   ").trim_start().dimmed()));
        }
        out
    }

    /// Outcome of saving questions into a category
    pub fn format_import(summary: &ImportSummary, category: &str) -> String {
        let mut out = format!(
            "{} {} saved to '{}', {} failed\n",
            "Import:".cyan().bold(),
            summary.success_count,
            category,
            summary.failed_count
        );
        for error in &summary.errors {
            out.push_str(&format!("  {} {}\n", "x".red(), error));
        }
        out
    }

    /// Configuration warnings, one per line
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let tag = if issue.is_error() {
                    "error".red().bold()
                } else {
                    "warning".yellow().bold()
                };
                format!("{}: config {}\n", tag, issue)
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_summary(&self, output: &CreateQuizOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &CreateQuizOutput) -> String {
        Self::format_json(output)
    }
}
