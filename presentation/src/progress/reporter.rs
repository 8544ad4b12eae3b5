//! Progress reporting for quiz generation

use colored::Colorize;
use docquiz_application::GenerationProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an extraction bar and a generation spinner
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn extraction_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn replace(&self, next: Option<ProgressBar>) -> Option<ProgressBar> {
        let mut guard = self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgressNotifier for ProgressReporter {
    fn on_extraction_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::extraction_style());
        pb.set_prefix("Extracting");
        pb.set_message("Starting...");
        if let Some(previous) = self.replace(Some(pb)) {
            previous.finish_and_clear();
        }
    }

    fn on_source_done(&self, label: &str, success: bool) {
        let guard = self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(pb) = guard.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_generation_start(&self, prompt_chars: usize) {
        if let Some(pb) = self.replace(None) {
            pb.finish_with_message(format!("{}", "done".green()));
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Generating");
        spinner.set_message(format!("sending {} characters to the model", prompt_chars));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.replace(Some(spinner));
    }

    fn on_generation_complete(&self, question_count: usize, issue_count: usize) {
        if let Some(spinner) = self.replace(None) {
            let message = if issue_count == 0 {
                format!("{} questions", question_count).green().to_string()
            } else {
                format!("{} questions, {} issues", question_count, issue_count)
                    .yellow()
                    .to_string()
            };
            spinner.finish_with_message(message);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.replace(None) {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress for non-terminal output
pub struct SimpleProgress;

impl GenerationProgressNotifier for SimpleProgress {
    fn on_extraction_start(&self, total: usize) {
        eprintln!("{} {} ({} sources)", "->".cyan(), "Extracting".bold(), total);
    }

    fn on_source_done(&self, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (skipped)", "x".red(), label);
        }
    }

    fn on_generation_start(&self, prompt_chars: usize) {
        eprintln!(
            "{} {} ({} characters)",
            "->".cyan(),
            "Generating".bold(),
            prompt_chars
        );
    }

    fn on_generation_complete(&self, question_count: usize, issue_count: usize) {
        eprintln!("  {} questions, {} issues", question_count, issue_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_survives_full_sequence() {
        let reporter = ProgressReporter::new();
        reporter.on_source_done("early.pdf", true);
        reporter.on_extraction_start(2);
        reporter.on_source_done("a.pdf", true);
        reporter.on_source_done("b.pdf", false);
        reporter.on_generation_start(1234);
        reporter.on_generation_complete(5, 1);
        assert!(reporter.replace(None).is_none());
    }
}
