//! Output format value object

use serde::{Deserialize, Serialize};

/// How a generated quiz is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing of questions and validation issues (default)
    #[default]
    Summary,
    /// The raw `QuizResult` as pretty JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_summary() {
        assert_eq!(OutputFormat::default(), OutputFormat::Summary);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let format: OutputFormat = serde_json::from_str("\"summary\"").unwrap();
        assert_eq!(format, OutputFormat::Summary);
    }
}
