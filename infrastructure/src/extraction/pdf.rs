//! PDF text extraction.
//!
//! The preferred path shells out to `pdftotext` (poppler-utils). Whether the
//! tool is installed is probed once, when the extractor is built, and carried
//! as a [`PdfToolCapability`]. Without it a degraded fallback parses the file
//! in-process with `pdf_oxide` and joins the page texts with newlines. Page
//! ranges are then approximated by slicing that text at a fixed number of
//! lines per page, which is not exact: a page with few lines shifts every
//! later page boundary.

use docquiz_application::ExtractionError;
use docquiz_domain::PageRange;
use pdf_oxide::PdfDocument;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Default lines-per-page used when approximating page ranges.
pub const DEFAULT_LINES_PER_PAGE: usize = 50;

/// Whether the PDF text tool can be used, determined once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfToolCapability {
    /// Resolved path of the `pdftotext` executable.
    Available(PathBuf),
    Unavailable,
}

impl PdfToolCapability {
    /// Look `command` up on `PATH`.
    pub fn probe(command: &str) -> Self {
        match which::which(command) {
            Ok(path) => {
                debug!("Using {} for PDF extraction", path.display());
                PdfToolCapability::Available(path)
            }
            Err(_) => {
                warn!(
                    "{} not found; PDF extraction will use a low-fidelity fallback. \
                     Install poppler-utils for better PDF support.",
                    command
                );
                PdfToolCapability::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PdfToolCapability::Available(_))
    }
}

/// Extracts text from PDF files.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    capability: PdfToolCapability,
    lines_per_page: usize,
}

impl PdfExtractor {
    pub fn new(capability: PdfToolCapability) -> Self {
        Self {
            capability,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }

    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines.max(1);
        self
    }

    pub fn capability(&self) -> &PdfToolCapability {
        &self.capability
    }

    /// Extract the whole document, or only `range` when given.
    pub async fn extract(&self, path: &Path, range: Option<PageRange>) -> Result<String, ExtractionError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ExtractionError::unreadable(path.display().to_string(), "file not found"));
        }

        let text = match &self.capability {
            PdfToolCapability::Available(tool) => run_pdftotext(tool, path, range).await?,
            PdfToolCapability::Unavailable => {
                warn!(
                    "Degraded PDF extraction for {} (pdftotext unavailable)",
                    path.display()
                );
                let owned = path.to_path_buf();
                let text = tokio::task::spawn_blocking(move || fallback_text(&owned))
                    .await
                    .map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))??;
                match range {
                    Some(range) => {
                        warn!(
                            "Approximating {} page(s) {} of {} at {} lines per page",
                            range.page_count(),
                            range,
                            path.display(),
                            self.lines_per_page
                        );
                        approximate_pages(&text, range, self.lines_per_page)
                    }
                    None => text,
                }
            }
        };

        if text.trim().is_empty() {
            return Err(match range {
                Some(range) => ExtractionError::InvalidRange {
                    location: path.display().to_string(),
                    range: range.to_string(),
                    reason: "no text in the requested pages".to_string(),
                },
                None => ExtractionError::Empty(path.display().to_string()),
            });
        }
        Ok(text)
    }
}

async fn run_pdftotext(tool: &Path, path: &Path, range: Option<PageRange>) -> Result<String, ExtractionError> {
    let mut command = Command::new(tool);
    if let Some(range) = range {
        command
            .arg("-f")
            .arg(range.from().to_string())
            .arg("-l")
            .arg(range.to().to_string());
    }
    command.arg(path).arg("-").kill_on_drop(true);

    let output = command
        .output()
        .await
        .map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if let Some(range) = range
            && stderr.contains("page range")
        {
            return Err(ExtractionError::InvalidRange {
                location: path.display().to_string(),
                range: range.to_string(),
                reason: stderr,
            });
        }
        return Err(ExtractionError::unreadable(
            path.display().to_string(),
            format!("pdftotext exited with {}: {}", output.status, stderr),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse the PDF in-process and join the text of every page with newlines.
///
/// Blocking; call from `spawn_blocking`. Pages whose text cannot be read are
/// treated as empty.
pub fn fallback_text(path: &Path) -> Result<String, ExtractionError> {
    let location = path.display().to_string();
    let mut doc = PdfDocument::open(path)
        .map_err(|e| ExtractionError::unreadable(&location, format!("failed to parse PDF: {e}")))?;
    let page_count = doc
        .page_count()
        .map_err(|e| ExtractionError::unreadable(&location, format!("failed to read page count: {e}")))?;

    let mut pages = Vec::with_capacity(page_count);
    for page_index in 0..page_count {
        let text = doc.extract_text(page_index).unwrap_or_default();
        pages.push(text.trim_end().to_string());
    }
    debug!("Parsed {} page(s) from {}", page_count, location);
    Ok(pages.join("\n"))
}

/// Approximate `range` by slicing whole-document text into fixed-size pages.
pub fn approximate_pages(text: &str, range: PageRange, lines_per_page: usize) -> String {
    let start = (range.from() as usize - 1).saturating_mul(lines_per_page);
    let end = (range.to() as usize).saturating_mul(lines_per_page);
    text.lines()
        .skip(start)
        .take(end - start)
        .collect::<Vec<_>>()
        .join("\n")
}
