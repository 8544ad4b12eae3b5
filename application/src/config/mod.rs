//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`GenerationParams`]: context budget and extraction concurrency

pub mod generation_params;

pub use generation_params::GenerationParams;
