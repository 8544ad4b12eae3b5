//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod document_extractor;
pub mod generation_client;
pub mod progress;
pub mod question_store;
