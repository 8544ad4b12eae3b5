//! Domain layer for docquiz
//!
//! This crate contains the core rules of the document-to-quiz pipeline as
//! pure value objects and functions. It performs no I/O and has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sources
//!
//! - **Primary** documents define what questions may be asked about
//! - **Supporting** documents and websites are context only
//!
//! ## Pipeline pieces owned here
//!
//! - Context assembly: primary-first merge bounded by a [`ContextBudget`]
//! - Prompt building: [`QuizPromptTemplate`]
//! - Result validation: [`quiz::validate`]

pub mod config;
pub mod context;
pub mod core;
pub mod prompt;
pub mod quiz;
pub mod source;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, OutputFormat, Severity};
pub use context::{AssembledContext, ContextBudget, ExtractedFragment, assemble};
pub use core::error::DomainError;
pub use prompt::{QuizPromptInput, QuizPromptTemplate};
pub use quiz::{
    AnswerType, AnswerTypeConfig, CorrectAnswer, Difficulty, DifficultyMix, GeneratedQuestion,
    QuestionEdit, QuestionId, QuizMetadata, QuizResult, ValidationIssue,
};
pub use source::{
    PageRange, SourceDocument, SourceFormat, SourceKind, SourceRole, parse_page_range,
    parse_page_ranges_input,
};
