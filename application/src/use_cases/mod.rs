//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod create_quiz;
pub mod import_quiz;
