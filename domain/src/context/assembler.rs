//! Context assembly: merges extracted fragments into one bounded prompt context.
//!
//! Primary fragments always come first, then supporting fragments, each in
//! input order. When the merged text exceeds the [`ContextBudget`], the
//! middle is cut: roughly 70% of the allowance is kept from the head and the
//! rest from the tail, joined by [`TRUNCATION_MARKER`]. Relevant material may
//! sit anywhere in the sources, so the context is never cut from one end only.

use super::context_budget::ContextBudget;
use super::fragment::ExtractedFragment;
use crate::core::error::DomainError;
use crate::util::{char_len, char_prefix, char_suffix};

/// Heading placed before the primary fragments.
pub const PRIMARY_HEADING: &str = "PRIMARY SOURCE MATERIALS (questions must come from these):";

/// Heading placed before the supporting fragments.
pub const SUPPORTING_HEADING: &str = "SUPPORTING MATERIALS (for context/reference only):";

/// Visible marker inserted where content was cut.
pub const TRUNCATION_MARKER: &str = "\n\n[... content truncated ...]\n\n";

/// Percentage of the kept characters taken from the head.
const HEAD_SHARE_PERCENT: usize = 70;

const DIVIDER_WIDTH: usize = 80;

/// The merged, bounded context handed to the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    text: String,
    original_chars: usize,
    truncated: bool,
    primary_count: usize,
    supporting_count: usize,
}

impl AssembledContext {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Length in characters before truncation.
    pub fn original_chars(&self) -> usize {
        self.original_chars
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn primary_count(&self) -> usize {
        self.primary_count
    }

    pub fn supporting_count(&self) -> usize {
        self.supporting_count
    }
}

/// Merge `fragments` into a single context no longer than `budget.max_chars()`.
///
/// Fails with [`DomainError::NoPrimaryContent`] when no primary fragment is
/// present: supporting material alone cannot ground a quiz.
pub fn assemble(
    fragments: &[ExtractedFragment],
    budget: &ContextBudget,
) -> Result<AssembledContext, DomainError> {
    let (primary, supporting): (Vec<_>, Vec<_>) =
        fragments.iter().partition(|f| f.is_primary());

    if primary.is_empty() {
        return Err(DomainError::NoPrimaryContent);
    }

    let mut text = String::new();
    text.push_str(PRIMARY_HEADING);
    text.push_str("\n\n");
    text.push_str(&join_fragments(&primary));

    if !supporting.is_empty() {
        text.push_str("\n\n");
        text.push_str(&"=".repeat(DIVIDER_WIDTH));
        text.push_str("\n\n");
        text.push_str(SUPPORTING_HEADING);
        text.push_str("\n\n");
        text.push_str(&join_fragments(&supporting));
    }

    let original_chars = char_len(&text);
    let max_chars = budget.max_chars();
    let truncated = original_chars > max_chars;
    if truncated {
        text = truncate_middle(&text, max_chars);
    }

    Ok(AssembledContext {
        text,
        original_chars,
        truncated,
        primary_count: primary.len(),
        supporting_count: supporting.len(),
    })
}

fn join_fragments(fragments: &[&ExtractedFragment]) -> String {
    fragments
        .iter()
        .map(|f| format!("=== {} ===\n{}\n", f.label(), f.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Keep a head and a tail of `text` around [`TRUNCATION_MARKER`] so the
/// result is at most `max_chars` characters.
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }

    let marker_chars = char_len(TRUNCATION_MARKER);
    if max_chars <= marker_chars + 1 {
        // No room for head + marker + tail.
        return char_prefix(text, max_chars).to_string();
    }

    let available = max_chars - marker_chars;
    let head_chars = available * HEAD_SHARE_PERCENT / 100;
    let tail_chars = available - head_chars;

    let mut out = String::with_capacity(text.len().min(max_chars * 4));
    out.push_str(char_prefix(text, head_chars));
    out.push_str(TRUNCATION_MARKER);
    out.push_str(char_suffix(text, tail_chars));
    out
}
