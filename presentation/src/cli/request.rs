//! Turning parsed arguments into a quiz request.

use super::commands::Cli;
use docquiz_application::CreateQuizInput;
use docquiz_domain::{
    AnswerTypeConfig, DifficultyMix, DomainError, PageRange, QuestionId, SourceDocument,
    parse_page_ranges_input,
};
use std::collections::HashMap;
use std::path::Path;

/// A request ready for the use case plus inputs that were dropped on the way.
#[derive(Debug)]
pub struct RequestPlan {
    pub input: CreateQuizInput,
    /// One line per skipped file or URL.
    pub warnings: Vec<String>,
}

impl Cli {
    /// Build the use case input. `default_questions` applies when `-n` is absent.
    ///
    /// Unsupported files and malformed URLs are skipped with a warning;
    /// inconsistent difficulty or answer-type settings are errors.
    pub fn to_request(&self, default_questions: u32) -> Result<RequestPlan, DomainError> {
        let question_count = self.questions.unwrap_or(default_questions);
        let mut warnings = Vec::new();
        let ranges = parse_page_ranges_input(&self.page_ranges.join("\n"));
        for entry in &self.page_ranges {
            if parse_page_ranges_input(entry).is_empty() {
                warnings.push(format!("Ignoring page range '{}': expected NAME: FROM-TO", entry));
            }
        }

        let mut primary = Vec::new();
        for path in &self.primary {
            match SourceDocument::primary_file(path.to_string_lossy()) {
                Ok(doc) => primary.push(match range_for(&ranges, path) {
                    Some(range) => doc.with_page_range(range),
                    None => doc,
                }),
                Err(e) => warnings.push(format!("Skipping {}: {}", path.display(), e)),
            }
        }

        let mut supporting = Vec::new();
        for path in &self.supporting {
            match SourceDocument::supporting_file(path.to_string_lossy()) {
                Ok(doc) => supporting.push(match range_for(&ranges, path) {
                    Some(range) => doc.with_page_range(range),
                    None => doc,
                }),
                Err(e) => warnings.push(format!("Skipping {}: {}", path.display(), e)),
            }
        }

        let mut urls = Vec::new();
        for url in &self.urls {
            if is_web_url(url) {
                urls.push(url.trim().to_string());
            } else {
                warnings.push(format!("Skipping invalid URL: {}", url));
            }
        }

        let mut input = CreateQuizInput::new(primary, question_count)
            .with_supporting_docs(supporting)
            .with_website_urls(urls);
        if let Some(mix) = self.difficulty_mix(question_count)? {
            input = input.with_difficulty_mix(mix);
        }
        if let Some(config) = self.answer_types()? {
            input = input.with_answer_types(config);
        }

        Ok(RequestPlan { input, warnings })
    }

    /// Difficulty counts from `--easy/--medium/--hard`; unset percentages count as 0.
    fn difficulty_mix(&self, question_count: u32) -> Result<Option<DifficultyMix>, DomainError> {
        if self.easy.is_none() && self.medium.is_none() && self.hard.is_none() {
            return Ok(None);
        }
        DifficultyMix::from_percentages(
            question_count,
            self.easy.unwrap_or(0),
            self.medium.unwrap_or(0),
            self.hard.unwrap_or(0),
        )
        .map(Some)
    }

    fn answer_types(&self) -> Result<Option<AnswerTypeConfig>, DomainError> {
        let Some(count) = self.multiple else {
            return Ok(None);
        };
        if self.multiple_easy.is_none() && self.multiple_medium.is_none() && self.multiple_hard.is_none() {
            return Ok(Some(AnswerTypeConfig::with_default_difficulty(count)));
        }
        let split = DifficultyMix::new(
            self.multiple_easy.unwrap_or(0),
            self.multiple_medium.unwrap_or(0),
            self.multiple_hard.unwrap_or(0),
        );
        AnswerTypeConfig::new(count, split).map(Some)
    }

    /// Ids given to `--select`, numbers where possible.
    pub fn selection(&self) -> Option<Vec<QuestionId>> {
        if self.select.is_empty() {
            return None;
        }
        Some(
            self.select
                .iter()
                .map(|raw| raw.trim())
                .filter(|raw| !raw.is_empty())
                .map(|raw| match raw.parse::<u64>() {
                    Ok(n) => QuestionId::Number(n),
                    Err(_) => QuestionId::Text(raw.to_string()),
                })
                .collect(),
        )
    }
}

/// Look a file up by its full path first, then by file name.
fn range_for(ranges: &HashMap<String, PageRange>, path: &Path) -> Option<PageRange> {
    ranges.get(path.to_string_lossy().as_ref()).copied().or_else(|| {
        path.file_name()
            .and_then(|name| ranges.get(name.to_string_lossy().as_ref()))
            .copied()
    })
}

fn is_web_url(url: &str) -> bool {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/') && !host.contains(char::is_whitespace))
}
