//! Infrastructure layer for docquiz
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod extraction;
pub mod gemini;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, FileConfig, FileExtractionConfig, FileGeminiConfig,
    FileGenerationConfig, FileOutputConfig,
};
pub use extraction::{ExtractionSettings, LocalDocumentExtractor, PdfToolCapability};
pub use gemini::{GeminiClient, GeminiEnvelope, GeminiSettings, ResponseEnvelope};
pub use storage::JsonlQuestionStore;
