//! DOCX and PPTX text extraction.
//!
//! Both formats are zip containers of XML parts. Text is recovered by
//! stripping markup from the document part (DOCX) or from each slide part
//! (PPTX); paragraph ends become line breaks.

use docquiz_application::ExtractionError;
use regex::Regex;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Main document part of a DOCX package.
const DOCX_DOCUMENT_PART: &str = "word/document.xml";

/// Default number of slide parts scanned in a PPTX package.
pub const DEFAULT_MAX_SLIDES: u32 = 49;

static PARAGRAPH_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</(?:w|a):p>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Read the text of a DOCX file.
pub async fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let path = path.to_path_buf();
    run_blocking(path.clone(), move || {
        let mut archive = open_archive(&path)?;
        let xml = read_part(&mut archive, DOCX_DOCUMENT_PART)
            .map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))?
            .ok_or_else(|| {
                ExtractionError::unreadable(path.display().to_string(), "missing word/document.xml")
            })?;
        non_empty(&path, strip_markup(&xml))
    })
    .await
}

/// Read the text of every slide `1..=max_slides` of a PPTX file.
///
/// Missing slide numbers are skipped; the scan never goes past `max_slides`.
pub async fn extract_pptx(path: &Path, max_slides: u32) -> Result<String, ExtractionError> {
    let path = path.to_path_buf();
    run_blocking(path.clone(), move || {
        let mut archive = open_archive(&path)?;
        let mut slides = Vec::new();
        for i in 1..=max_slides {
            let part = format!("ppt/slides/slide{}.xml", i);
            if let Some(xml) = read_part(&mut archive, &part)
                .map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))?
            {
                slides.push(strip_markup(&xml));
            }
        }
        debug!("Read {} slides from {}", slides.len(), path.display());
        if slides.is_empty() {
            return Err(ExtractionError::unreadable(path.display().to_string(), "no slides found"));
        }
        non_empty(&path, slides.join("\n"))
    })
    .await
}

/// Remove XML tags, turning paragraph ends into newlines and decoding the
/// predefined XML entities.
pub fn strip_markup(xml: &str) -> String {
    let with_breaks = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&text);
    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, ExtractionError> {
    let file = File::open(path).map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))?;
    ZipArchive::new(file).map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))
}

/// Read one part; `Ok(None)` if the container has no such entry.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>, ZipError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

fn non_empty(path: &Path, text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::Empty(path.display().to_string()))
    } else {
        Ok(text)
    }
}

async fn run_blocking<F>(path: PathBuf, work: F) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, ExtractionError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExtractionError::unreadable(path.display().to_string(), e))?
}
