//! Language-model completion backend
//!
//! The pipeline renders a coaching prompt and hands it to a
//! `CompletionBackend`; `OpenRouterClient` speaks the chat-completions
//! protocol.

mod openrouter;

use async_trait::async_trait;

use crate::error::PipelineError;

pub use openrouter::OpenRouterClient;

/// Completion port: one prompt in, the model's raw reply text out. A non-2xx
/// response surfaces as `PipelineError::Upstream` carrying the raw body.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PipelineError>;
}
