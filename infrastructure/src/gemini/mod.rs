//! Gemini generation adapter.

pub mod client;
pub mod envelope;

pub use client::{GeminiClient, GeminiSettings};
pub use envelope::{GeminiEnvelope, ResponseEnvelope};
