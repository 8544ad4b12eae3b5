//! Generation client port
//!
//! Defines the interface for sending a prompt to a generative model and
//! receiving a decoded [`QuizResult`].

use async_trait::async_trait;
use docquiz_domain::QuizResult;
use thiserror::Error;

/// Errors from the model-call layer.
///
/// Each variant carries the provider's own error detail when one was
/// available, so callers can surface it verbatim. None are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("API authentication failed. {0}")]
    Auth(String),

    #[error("API quota exceeded. {0}")]
    QuotaExceeded(String),

    #[error("Bad request to API. {0}")]
    BadRequest(String),

    #[error("API endpoint or model not found. {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Provider detail carried by this error.
    pub fn detail(&self) -> &str {
        match self {
            GenerationError::Auth(d)
            | GenerationError::QuotaExceeded(d)
            | GenerationError::BadRequest(d)
            | GenerationError::NotFound(d)
            | GenerationError::Transport(d)
            | GenerationError::MalformedResponse(d) => d,
        }
    }
}

/// Client for a generative model that answers with structured quiz JSON.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send `prompt` and decode the reply into a [`QuizResult`].
    async fn generate(&self, prompt: &str) -> Result<QuizResult, GenerationError>;
}
