//! Application layer for docquiz
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    document_extractor::{DocumentExtractor, ExtractionError},
    generation_client::{GenerationClient, GenerationError},
    progress::{GenerationProgressNotifier, NoProgress},
    question_store::{ImportSummary, QuestionStore, StoreError},
};
pub use use_cases::create_quiz::{
    CreateQuizError, CreateQuizInput, CreateQuizOutput, CreateQuizUseCase, SkippedSource,
};
pub use use_cases::import_quiz::{ImportQuizError, ImportQuizUseCase};
