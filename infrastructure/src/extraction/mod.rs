//! Document extraction adapters.
//!
//! [`LocalDocumentExtractor`] implements the
//! [`DocumentExtractor`](docquiz_application::DocumentExtractor) port by
//! dispatching on [`SourceFormat`] to the PDF, office and web extractors.

pub mod office;
pub mod pdf;
pub mod web;

pub use pdf::{PdfExtractor, PdfToolCapability};
pub use web::WebExtractor;

use async_trait::async_trait;
use docquiz_application::{DocumentExtractor, ExtractionError};
use docquiz_domain::{SourceDocument, SourceFormat};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Settings for [`LocalDocumentExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub pdftotext_command: String,
    pub lines_per_page: usize,
    pub max_slides: u32,
    pub fetch_timeout: Duration,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            pdftotext_command: "pdftotext".to_string(),
            lines_per_page: pdf::DEFAULT_LINES_PER_PAGE,
            max_slides: office::DEFAULT_MAX_SLIDES,
            fetch_timeout: web::DEFAULT_FETCH_TIMEOUT,
            max_body_bytes: web::DEFAULT_MAX_BODY_BYTES,
            user_agent: web::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Extracts local files and web pages.
#[derive(Debug, Clone)]
pub struct LocalDocumentExtractor {
    pdf: PdfExtractor,
    web: WebExtractor,
    max_slides: u32,
}

impl LocalDocumentExtractor {
    /// Build an extractor, probing for the PDF tool once.
    pub fn new(settings: &ExtractionSettings) -> Result<Self, reqwest::Error> {
        let capability = PdfToolCapability::probe(&settings.pdftotext_command);
        Self::with_capability(settings, capability)
    }

    /// Build an extractor with an explicit PDF tool capability.
    pub fn with_capability(settings: &ExtractionSettings, capability: PdfToolCapability) -> Result<Self, reqwest::Error> {
        Ok(Self {
            pdf: PdfExtractor::new(capability).with_lines_per_page(settings.lines_per_page),
            web: WebExtractor::new(settings.fetch_timeout, settings.max_body_bytes, settings.user_agent.clone())?,
            max_slides: settings.max_slides,
        })
    }

    pub fn pdf_capability(&self) -> &PdfToolCapability {
        self.pdf.capability()
    }
}

#[async_trait]
impl DocumentExtractor for LocalDocumentExtractor {
    async fn extract(&self, document: &SourceDocument) -> Result<String, ExtractionError> {
        debug!("Extracting {} ({})", document.location(), document.format().as_str());
        let path = Path::new(document.location());
        match document.format() {
            SourceFormat::Pdf => self.pdf.extract(path, document.page_range()).await,
            SourceFormat::Docx => office::extract_docx(path).await,
            SourceFormat::Pptx => office::extract_pptx(path, self.max_slides).await,
            SourceFormat::Url => self.web.extract(document.location()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docquiz_domain::PageRange;

    fn extractor() -> LocalDocumentExtractor {
        LocalDocumentExtractor::with_capability(&ExtractionSettings::default(), PdfToolCapability::Unavailable)
            .unwrap()
    }

    #[tokio::test]
    async fn test_dispatches_pdf_with_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.pdf");
        std::fs::write(&path, b"BT (Alpha) Tj ET").unwrap();

        let doc = SourceDocument::primary_file(path.display().to_string())
            .unwrap()
            .with_page_range(PageRange::new(1, 1).unwrap());
        assert_eq!(extractor().extract(&doc).await.unwrap(), "Alpha");
    }

    #[tokio::test]
    async fn test_missing_docx_is_unreadable() {
        let doc = SourceDocument::supporting_file("/nonexistent/notes.docx").unwrap();
        assert!(matches!(
            extractor().extract(&doc).await,
            Err(ExtractionError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = ExtractionSettings::default();
        assert_eq!(settings.lines_per_page, 50);
        assert_eq!(settings.max_slides, 49);
        assert_eq!(settings.max_body_bytes, 5 * 1024 * 1024);
    }
}
