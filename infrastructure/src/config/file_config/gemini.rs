//! Gemini configuration from TOML (`[gemini]` section)

use crate::gemini::client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT};
use crate::gemini::GeminiSettings;
use docquiz_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable read for the API key unless overridden.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Raw Gemini configuration from TOML.
///
/// # Example
///
/// ```toml
/// [gemini]
/// api_key_env = "GEMINI_API_KEY"
/// model = "gemini-2.5-flash"
/// temperature = 0.7
/// timeout_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Inline API key. The environment variable wins when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key through `lookup` (normally `std::env::var`).
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        lookup(&self.api_key_env)
            .or_else(|| self.api_key.clone())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Build client settings, replacing invalid values with defaults.
    pub fn to_settings(&self, api_key: impl Into<String>) -> (GeminiSettings, Vec<ConfigIssue>) {
        let issues = self.validate();
        let defaults = Self::default();
        let valid = |key: &str| !issues.iter().any(|issue| issue.key == key);

        let mut settings = GeminiSettings::new(api_key);
        settings = settings.with_base_url(if valid("gemini.base_url") {
            self.base_url.trim_end_matches('/').to_string()
        } else {
            defaults.base_url
        });
        settings = settings.with_model(if valid("gemini.model") {
            self.model.trim().to_string()
        } else {
            defaults.model
        });
        settings = settings.with_temperature(if valid("gemini.temperature") {
            self.temperature
        } else {
            defaults.temperature
        });
        settings = settings.with_timeout(Duration::from_secs(if valid("gemini.timeout_secs") {
            self.timeout_secs
        } else {
            defaults.timeout_secs
        }));
        (settings, issues)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "gemini.model",
                format!("empty model name, using '{}'", DEFAULT_MODEL),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::warning(
                "gemini.base_url",
                format!("'{}' is not an http(s) URL, using the default", self.base_url),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                "gemini.temperature",
                format!(
                    "{} is outside 0.0..=2.0, using {}",
                    self.temperature, DEFAULT_TEMPERATURE
                ),
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "gemini.timeout_secs",
                "must be at least 1 second, using the default",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_resolution_order() {
        let mut config = FileGeminiConfig {
            api_key: Some("inline".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_key(|name| (name == "GEMINI_API_KEY").then(|| "env".to_string())),
            Some("env".to_string())
        );
        assert_eq!(config.resolve_api_key(|_| None), Some("inline".to_string()));

        config.api_key = Some("  ".to_string());
        assert_eq!(config.resolve_api_key(|_| None), None);

        config.api_key_env = "MY_KEY".to_string();
        assert_eq!(
            config.resolve_api_key(|name| (name == "MY_KEY").then(|| "custom".to_string())),
            Some("custom".to_string())
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = FileGeminiConfig {
            model: " ".to_string(),
            temperature: 3.5,
            timeout_secs: 0,
            ..Default::default()
        };
        let (settings, issues) = config.to_settings("k");
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| !issue.is_error()));
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_valid_values_pass_through() {
        let config = FileGeminiConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            model: "gemini-pro".to_string(),
            temperature: 0.2,
            timeout_secs: 10,
            ..Default::default()
        };
        let (settings, issues) = config.to_settings("k");
        assert!(issues.is_empty());
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
        assert_eq!(settings.model, "gemini-pro");
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }
}
