//! Generative-AI collaborator.
//!
//! The planner only needs "prompt in, JSON text out"; everything else about
//! the provider stays behind [`TextGenerator`].

pub mod gemini;
pub mod prompts;
pub mod reply;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use reply::{AdjustedPortions, Amount, MenuEntry, MenuReply, PortionReply, ReplyError};

/// Failure to obtain a reply from the model at all.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0} is not configured")]
    MissingCredentials(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API response carried no text: {0}")]
    EmptyResponse(String),
}

/// Text generation with a JSON-only answer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to `model` and return the raw reply text.
    async fn generate_json(&self, model: &str, prompt: &str) -> Result<String, AiError>;
}
