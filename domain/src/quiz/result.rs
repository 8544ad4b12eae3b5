//! The structured result of one generation call.

use super::lenient;
use super::question::GeneratedQuestion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value stamped into `metadata.source_type` by the generation use case.
pub const PRIMARY_DOCUMENTS_SOURCE_TYPE: &str = "primary_documents";

/// Metadata attached to a [`QuizResult`].
///
/// The model fills `total_questions` and `generated_at`; the generation use
/// case stamps the source fields. Unknown keys are preserved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizMetadata {
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_questions: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_count: Option<usize>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Questions plus metadata, as decoded from the model reply.
///
/// Any JSON object decodes; problems inside individual questions are left
/// for [`validate`](super::validate) to report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(default, deserialize_with = "lenient::questions")]
    pub questions: Vec<GeneratedQuestion>,
    #[serde(default)]
    pub metadata: QuizMetadata,
}

impl QuizResult {
    pub fn new(questions: Vec<GeneratedQuestion>) -> Self {
        let total = questions.len() as u64;
        Self {
            questions,
            metadata: QuizMetadata {
                total_questions: Some(total),
                ..Default::default()
            },
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Record where the questions came from.
    pub fn stamp_sources(&mut self, primary_count: usize, supporting_count: usize) {
        self.metadata.source_type = Some(PRIMARY_DOCUMENTS_SOURCE_TYPE.to_string());
        self.metadata.primary_count = Some(primary_count);
        self.metadata.supporting_count = Some(supporting_count);
    }
}
