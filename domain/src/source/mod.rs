//! Source documents: what the caller hands in for extraction.
//!
//! - [`document::SourceDocument`]: one file or URL with its role and format
//! - [`page_range::PageRange`]: validated inclusive page range, plus the
//!   lenient text parsers used by callers

pub mod document;
pub mod page_range;

pub use document::{SourceDocument, SourceFormat, SourceKind, SourceRole};
pub use page_range::{PageRange, parse_page_range, parse_page_ranges_input};
