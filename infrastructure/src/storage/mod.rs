//! Question storage adapters.

mod jsonl_store;

pub use jsonl_store::JsonlQuestionStore;
