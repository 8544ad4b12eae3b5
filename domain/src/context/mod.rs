//! Prompt context: extracted fragments and their bounded assembly.
//!
//! - [`fragment::ExtractedFragment`]: non-empty text from one source
//! - [`context_budget::ContextBudget`]: token allowance converted to a char cap
//! - [`assembler::assemble`]: primary-first merge with head+tail truncation

pub mod assembler;
pub mod context_budget;
pub mod fragment;

pub use assembler::{AssembledContext, TRUNCATION_MARKER, assemble, truncate_middle};
pub use context_budget::ContextBudget;
pub use fragment::ExtractedFragment;
