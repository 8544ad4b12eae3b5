//! Source document references

use super::page_range::PageRange;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Role a source plays in quiz generation.
///
/// Primary material bounds what questions may be asked; supporting material
/// is context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    Primary,
    Supporting,
}

impl SourceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceRole::Primary => "primary",
            SourceRole::Supporting => "supporting",
        }
    }
}

impl std::fmt::Display for SourceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of input a [`SourceDocument`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    PrimaryFile,
    SupportingFile,
    SupportingUrl,
}

impl SourceKind {
    pub fn role(&self) -> SourceRole {
        match self {
            SourceKind::PrimaryFile => SourceRole::Primary,
            SourceKind::SupportingFile | SourceKind::SupportingUrl => SourceRole::Supporting,
        }
    }
}

/// Format of the source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Docx,
    Pptx,
    Url,
}

impl SourceFormat {
    /// Detect a file format from its extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            "pptx" => Some(SourceFormat::Pptx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Pptx => "pptx",
            SourceFormat::Url => "url",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to one input of a generation call (Value Object)
///
/// Produced by the caller from already-materialized local paths or URLs and
/// consumed once by a document extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    kind: SourceKind,
    location: String,
    format: SourceFormat,
    page_range: Option<PageRange>,
}

impl SourceDocument {
    /// A primary file; the format is detected from the extension.
    pub fn primary_file(path: impl Into<String>) -> Result<Self, DomainError> {
        Self::file(SourceKind::PrimaryFile, path.into())
    }

    /// A supporting file; the format is detected from the extension.
    pub fn supporting_file(path: impl Into<String>) -> Result<Self, DomainError> {
        Self::file(SourceKind::SupportingFile, path.into())
    }

    /// A supporting web page. Websites are never primary material.
    pub fn supporting_url(url: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::SupportingUrl,
            location: url.into(),
            format: SourceFormat::Url,
            page_range: None,
        }
    }

    fn file(kind: SourceKind, path: String) -> Result<Self, DomainError> {
        let format = SourceFormat::from_path(&path)
            .ok_or_else(|| DomainError::UnsupportedFormat(path.clone()))?;
        Ok(Self {
            kind,
            location: path,
            format,
            page_range: None,
        })
    }

    /// Restrict extraction to a page range. Only meaningful for PDFs.
    pub fn with_page_range(mut self, range: PageRange) -> Self {
        self.page_range = Some(range);
        self
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn role(&self) -> SourceRole {
        self.kind.role()
    }

    /// Local path or URL.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn page_range(&self) -> Option<PageRange> {
        self.page_range
    }

    /// File name (or the URL itself for websites).
    pub fn display_name(&self) -> &str {
        match self.kind {
            SourceKind::SupportingUrl => &self.location,
            _ => Path::new(&self.location)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.location),
        }
    }

    /// Heading used to identify this source inside the assembled context,
    /// e.g. `PRIMARY DOCUMENT: lecture.pdf (pages 1-10)`.
    pub fn label(&self) -> String {
        let prefix = match self.kind {
            SourceKind::PrimaryFile => "PRIMARY DOCUMENT",
            SourceKind::SupportingFile => "SUPPORTING DOCUMENT",
            SourceKind::SupportingUrl => "SUPPORTING WEBSITE",
        };
        match self.page_range {
            Some(range) => format!("{}: {} (pages {})", prefix, self.display_name(), range),
            None => format!("{}: {}", prefix, self.display_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path("a/b/lecture.PDF"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_path("notes.docx"), Some(SourceFormat::Docx));
        assert_eq!(SourceFormat::from_path("deck.pptx"), Some(SourceFormat::Pptx));
        assert_eq!(SourceFormat::from_path("readme.txt"), None);
        assert_eq!(SourceFormat::from_path("no_extension"), None);
    }

    #[test]
    fn test_unsupported_file_is_rejected() {
        let err = SourceDocument::primary_file("/tmp/notes.txt").unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_roles() {
        let primary = SourceDocument::primary_file("/tmp/a.pdf").unwrap();
        let supporting = SourceDocument::supporting_file("/tmp/b.docx").unwrap();
        let website = SourceDocument::supporting_url("https://example.com");
        assert_eq!(primary.role(), SourceRole::Primary);
        assert_eq!(supporting.role(), SourceRole::Supporting);
        assert_eq!(website.role(), SourceRole::Supporting);
        assert_eq!(website.format(), SourceFormat::Url);
    }

    #[test]
    fn test_labels() {
        let primary = SourceDocument::primary_file("/tmp/upload/lecture.pdf")
            .unwrap()
            .with_page_range(PageRange::new(1, 10).unwrap());
        assert_eq!(primary.label(), "PRIMARY DOCUMENT: lecture.pdf (pages 1-10)");

        let supporting = SourceDocument::supporting_file("deck.pptx").unwrap();
        assert_eq!(supporting.label(), "SUPPORTING DOCUMENT: deck.pptx");

        let website = SourceDocument::supporting_url("https://example.com/page");
        assert_eq!(website.label(), "SUPPORTING WEBSITE: https://example.com/page");
    }
}
