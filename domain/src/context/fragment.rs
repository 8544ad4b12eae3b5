//! Extracted text fragments

use crate::source::{SourceDocument, SourceRole};
use serde::{Deserialize, Serialize};

/// Text extracted from one source document (Value Object)
///
/// The text is never empty: failed or blank extractions are dropped before a
/// fragment is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFragment")]
pub struct ExtractedFragment {
    role: SourceRole,
    label: String,
    text: String,
}

#[derive(Deserialize)]
struct RawFragment {
    role: SourceRole,
    label: String,
    text: String,
}

impl TryFrom<RawFragment> for ExtractedFragment {
    type Error = &'static str;

    fn try_from(raw: RawFragment) -> Result<Self, Self::Error> {
        Self::try_new(raw.role, raw.label, raw.text).ok_or("fragment text must not be empty")
    }
}

impl ExtractedFragment {
    /// Create a fragment, returning `None` if the text is empty or whitespace.
    pub fn try_new(role: SourceRole, label: impl Into<String>, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            role,
            label: label.into(),
            text,
        })
    }

    /// Create a fragment for `doc`, using its role and label.
    pub fn from_source(doc: &SourceDocument, text: impl Into<String>) -> Option<Self> {
        Self::try_new(doc.role(), doc.label(), text)
    }

    pub fn role(&self) -> SourceRole {
        self.role
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_primary(&self) -> bool {
        self.role == SourceRole::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(ExtractedFragment::try_new(SourceRole::Primary, "a", "").is_none());
        assert!(ExtractedFragment::try_new(SourceRole::Primary, "a", " \n\t ").is_none());
    }

    #[test]
    fn test_from_source_uses_label_and_role() {
        let doc = SourceDocument::supporting_url("https://example.com");
        let fragment = ExtractedFragment::from_source(&doc, "body text").unwrap();
        assert_eq!(fragment.role(), SourceRole::Supporting);
        assert_eq!(fragment.label(), "SUPPORTING WEBSITE: https://example.com");
        assert_eq!(fragment.text(), "body text");
        assert!(!fragment.is_primary());
    }

    #[test]
    fn test_deserialize_rejects_blank_text() {
        let ok: ExtractedFragment =
            serde_json::from_str(r#"{"role": "primary", "label": "notes", "text": "cells"}"#).unwrap();
        assert_eq!(ok.text(), "cells");

        let err = serde_json::from_str::<ExtractedFragment>(r#"{"role": "primary", "label": "notes", "text": "  "}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }
}
