//! Page range value object and its text parsers.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An inclusive, 1-based page range (Value Object)
///
/// Always satisfies `from >= 1` and `to >= from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRange")]
pub struct PageRange {
    from: u32,
    to: u32,
}

#[derive(Deserialize)]
struct RawPageRange {
    from: u32,
    to: u32,
}

impl TryFrom<RawPageRange> for PageRange {
    type Error = DomainError;

    fn try_from(raw: RawPageRange) -> Result<Self, Self::Error> {
        PageRange::new(raw.from, raw.to)
    }
}

impl PageRange {
    /// Create a validated page range.
    pub fn new(from: u32, to: u32) -> Result<Self, DomainError> {
        if from < 1 || to < from {
            return Err(DomainError::InvalidPageRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    /// Number of pages covered by the range.
    pub fn page_count(&self) -> u32 {
        self.to - self.from + 1
    }

    /// Parse forms like `"10-20"` or `"5 - 15"`.
    ///
    /// Anything else (empty input, non-numeric parts, reversed or zero-based
    /// ranges) yields `None`, meaning "no range".
    pub fn parse(input: &str) -> Option<Self> {
        parse_page_range(input)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Parse a page range string, returning `None` for malformed input.
pub fn parse_page_range(input: &str) -> Option<PageRange> {
    let trimmed = input.trim();
    let (from, to) = trimmed.split_once('-')?;
    let from = parse_page_number(from.trim())?;
    let to = parse_page_number(to.trim())?;
    PageRange::new(from, to).ok()
}

fn parse_page_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a per-file page range listing, one `filename: from-to` entry per line.
///
/// Lines that do not parse are ignored. When the same file appears twice the
/// later line wins.
pub fn parse_page_ranges_input(input: &str) -> HashMap<String, PageRange> {
    let mut ranges = HashMap::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // File names may themselves contain ':'; use the first colon whose
        // remainder is a valid range.
        for (idx, _) in line.match_indices(':') {
            let name = line[..idx].trim();
            if name.is_empty() {
                continue;
            }
            if let Some(range) = parse_page_range(&line[idx + 1..]) {
                ranges.insert(name.to_string(), range);
                break;
            }
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_bounds() {
        assert!(PageRange::new(0, 3).is_err());
        assert!(PageRange::new(5, 4).is_err());
        assert_eq!(
            PageRange::new(5, 4).unwrap_err(),
            DomainError::InvalidPageRange { from: 5, to: 4 }
        );
        assert!(PageRange::new(3, 3).is_ok());
    }

    #[test]
    fn test_parse_accepts_spacing_variants() {
        assert_eq!(parse_page_range("10-20"), Some(PageRange::new(10, 20).unwrap()));
        assert_eq!(parse_page_range("5 - 15"), Some(PageRange::new(5, 15).unwrap()));
        assert_eq!(parse_page_range("  7-7  "), Some(PageRange::new(7, 7).unwrap()));
    }

    #[test]
    fn test_parse_round_trips_canonical_form() {
        for (from, to) in [(1, 1), (1, 10), (3, 250), (99, 100), (12, 4000)] {
            let canonical = format!("{}-{}", from, to);
            let range = parse_page_range(&canonical).unwrap();
            assert_eq!(range.to_string(), canonical);
            assert_eq!((range.from(), range.to()), (from, to));
        }
    }

    #[test]
    fn test_parse_malformed_is_no_range() {
        for input in [
            "", "   ", "10", "-5-10", "10-", "-10", "20-10", "0-5", "a-b", "1 0-20", "1-2-3",
            "1.5-3", "+1-3", "99999999999-99999999999",
        ] {
            assert_eq!(parse_page_range(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(PageRange::new(1, 10).unwrap().page_count(), 10);
        assert_eq!(PageRange::new(4, 4).unwrap().page_count(), 1);
    }

    #[test]
    fn test_deserialize_enforces_invariant() {
        let ok: PageRange = serde_json::from_str(r#"{"from": 2, "to": 9}"#).unwrap();
        assert_eq!(ok.to_string(), "2-9");
        assert!(serde_json::from_str::<PageRange>(r#"{"from": 9, "to": 2}"#).is_err());
    }

    #[test]
    fn test_parse_page_ranges_input() {
        let input = "lecture.pdf: 10-20\nslides.pdf:1-5\n\nbroken line\nnotes.pdf: 9-3\n";
        let ranges = parse_page_ranges_input(input);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges["lecture.pdf"].to_string(), "10-20");
        assert_eq!(ranges["slides.pdf"].to_string(), "1-5");
        assert!(!ranges.contains_key("notes.pdf"));
    }

    #[test]
    fn test_parse_page_ranges_input_filename_with_colon() {
        let ranges = parse_page_ranges_input("C:\\docs\\week1.pdf: 2-4");
        assert_eq!(ranges["C:\\docs\\week1.pdf"].to_string(), "2-4");
    }

    #[test]
    fn test_parse_page_ranges_input_empty() {
        assert!(parse_page_ranges_input("").is_empty());
        assert!(parse_page_ranges_input("  \n  ").is_empty());
    }
}
