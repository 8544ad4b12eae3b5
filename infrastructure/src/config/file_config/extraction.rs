//! Extraction configuration from TOML (`[extraction]` section)

use crate::extraction::{ExtractionSettings, office, pdf, web};
use docquiz_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw extraction configuration from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExtractionConfig {
    /// Command (or path) of the external PDF text tool.
    pub pdftotext_command: String,
    /// Lines treated as one page when the PDF tool is missing.
    pub lines_per_page: usize,
    /// Slides 1..=max_slides are scanned in presentations.
    pub max_slides: u32,
    pub fetch_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for FileExtractionConfig {
    fn default() -> Self {
        Self {
            pdftotext_command: "pdftotext".to_string(),
            lines_per_page: pdf::DEFAULT_LINES_PER_PAGE,
            max_slides: office::DEFAULT_MAX_SLIDES,
            fetch_timeout_secs: web::DEFAULT_FETCH_TIMEOUT.as_secs(),
            max_body_bytes: web::DEFAULT_MAX_BODY_BYTES,
            user_agent: web::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FileExtractionConfig {
    pub fn to_settings(&self) -> (ExtractionSettings, Vec<ConfigIssue>) {
        let defaults = ExtractionSettings::default();
        let mut issues = Vec::new();
        let mut zero = |key: &str| {
            issues.push(ConfigIssue::warning(
                format!("extraction.{}", key),
                "must be greater than 0, using the default",
            ));
        };

        let lines_per_page = if self.lines_per_page == 0 {
            zero("lines_per_page");
            defaults.lines_per_page
        } else {
            self.lines_per_page
        };
        let max_slides = if self.max_slides == 0 {
            zero("max_slides");
            defaults.max_slides
        } else {
            self.max_slides
        };
        let fetch_timeout = if self.fetch_timeout_secs == 0 {
            zero("fetch_timeout_secs");
            defaults.fetch_timeout
        } else {
            Duration::from_secs(self.fetch_timeout_secs)
        };
        let max_body_bytes = if self.max_body_bytes == 0 {
            zero("max_body_bytes");
            defaults.max_body_bytes
        } else {
            self.max_body_bytes
        };

        let mut pdftotext_command = self.pdftotext_command.trim().to_string();
        if pdftotext_command.is_empty() {
            issues.push(ConfigIssue::warning(
                "extraction.pdftotext_command",
                "empty command, using 'pdftotext'",
            ));
            pdftotext_command = defaults.pdftotext_command.clone();
        }
        let user_agent = if self.user_agent.trim().is_empty() {
            defaults.user_agent.clone()
        } else {
            self.user_agent.clone()
        };

        let settings = ExtractionSettings {
            pdftotext_command,
            lines_per_page,
            max_slides,
            fetch_timeout,
            max_body_bytes,
            user_agent,
        };
        (settings, issues)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.to_settings().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_extractor_defaults() {
        let (settings, issues) = FileExtractionConfig::default().to_settings();
        assert!(issues.is_empty());
        assert_eq!(settings.lines_per_page, 50);
        assert_eq!(settings.max_slides, 49);
        assert_eq!(settings.pdftotext_command, "pdftotext");
    }

    #[test]
    fn test_zero_values_warn() {
        let config = FileExtractionConfig {
            lines_per_page: 0,
            max_slides: 0,
            pdftotext_command: String::new(),
            ..Default::default()
        };
        let (settings, issues) = config.to_settings();
        assert_eq!(issues.len(), 3);
        assert_eq!(settings.lines_per_page, 50);
        assert_eq!(settings.max_slides, 49);
        assert_eq!(settings.pdftotext_command, "pdftotext");
        assert_eq!(issues[0].key, "extraction.lines_per_page");
    }
}
