//! Prompt domain
//!
//! Pure string construction of the quiz-generation prompt.

mod template;

pub use template::{QuizPromptInput, QuizPromptTemplate};
