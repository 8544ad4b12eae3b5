//! Web page text extraction.

use docquiz_application::ExtractionError;
use docquiz_domain::util::collapse_whitespace;
use scraper::{ElementRef, Html, Node};
use std::time::Duration;
use tracing::debug;

/// Default maximum response body size (5 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Default request timeout for page fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_USER_AGENT: &str = concat!("docquiz/", env!("CARGO_PKG_VERSION"));

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Fetches pages over HTTP and reduces them to plain text.
#[derive(Debug, Clone)]
pub struct WebExtractor {
    client: reqwest::Client,
    max_body_bytes: usize,
    user_agent: String,
}

impl WebExtractor {
    pub fn new(timeout: Duration, max_body_bytes: usize, user_agent: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            max_body_bytes,
            user_agent: user_agent.into(),
        })
    }

    /// Fetch `url` and return its readable text.
    pub async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ExtractionError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::fetch(
                url,
                format!(
                    "HTTP error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        if let Some(length) = response.content_length()
            && length > self.max_body_bytes as u64
        {
            return Err(ExtractionError::fetch(
                url,
                format!("Response too large: {} bytes (max: {} bytes)", length, self.max_body_bytes),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !is_textual(&content_type) {
            return Err(ExtractionError::fetch(url, format!("non-text content type '{}'", content_type)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractionError::fetch(url, format!("Failed to read response body: {}", e)))?;
        if body.len() > self.max_body_bytes {
            return Err(ExtractionError::fetch(url, format!("Response too large: {} bytes", body.len())));
        }
        debug!("Fetched {} bytes from {}", body.len(), url);

        let body = String::from_utf8_lossy(&body);
        let text = if content_type.is_empty() || content_type.contains("html") || content_type.contains("xml") {
            html_to_text(&body)
        } else {
            collapse_whitespace(&body)
        };

        if text.is_empty() {
            return Err(ExtractionError::Empty(url.to_string()));
        }
        Ok(text)
    }
}

/// Text-like media types; an absent header is given the benefit of the doubt.
fn is_textual(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.contains("html")
        || content_type.contains("xml")
        || content_type.contains("json")
}

/// Extract readable text from HTML, stripping tags, scripts, and styles.
///
/// All whitespace runs collapse to a single space.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    collect_text(root, &mut parts);
    collapse_whitespace(&parts.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => parts.push(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, parts);
                }
            }
            _ => {}
        }
    }
}
