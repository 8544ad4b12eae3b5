//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Each section converts into
//! the settings type its adapter or use case consumes, reporting invalid
//! values as [`ConfigIssue`] warnings and falling back to defaults.

mod extraction;
mod gemini;
mod generation;
mod output;

pub use extraction::FileExtractionConfig;
pub use gemini::{DEFAULT_API_KEY_ENV, FileGeminiConfig};
pub use generation::{DEFAULT_QUESTION_COUNT, FileGenerationConfig};
pub use output::FileOutputConfig;

use docquiz_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint and credentials
    pub gemini: FileGeminiConfig,
    /// Question defaults and pipeline limits
    pub generation: FileGenerationConfig,
    /// Extractor settings
    pub extraction: FileExtractionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.gemini.validate();
        issues.extend(self.generation.validate());
        issues.extend(self.extraction.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docquiz_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gemini]
api_key_env = "QUIZ_KEY"
model = "gemini-2.0-flash"
temperature = 0.4
timeout_secs = 120

[generation]
default_questions = 10
max_concurrent_extractions = 2

[extraction]
pdftotext_command = "/usr/local/bin/pdftotext"
max_slides = 20

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key_env, "QUIZ_KEY");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout_secs, 120);
        assert_eq!(config.generation.default_questions, 10);
        assert_eq!(config.generation.chars_per_token, 4);
        assert_eq!(config.extraction.max_slides, 20);
        assert_eq!(config.extraction.lines_per_page, 50);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[gemini]
temperature = 1.2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.temperature, 1.2);
        assert_eq!(config.gemini.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.generation.default_questions, DEFAULT_QUESTION_COUNT);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_collects_every_section() {
        let toml_str = r#"
[gemini]
temperature = 9.0

[generation]
max_concurrent_extractions = 0

[extraction]
lines_per_page = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let keys: Vec<String> = config.validate().into_iter().map(|i| i.key).collect();
        assert_eq!(
            keys,
            vec![
                "gemini.temperature",
                "generation.max_concurrent_extractions",
                "extraction.lines_per_page"
            ]
        );
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }
}
