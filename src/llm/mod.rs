//! LLM integration for meal estimation.
//!
//! Defines the `CompletionProvider` trait and the Groq implementation.
//! The estimator only ever sees the trait, so tests can swap in a fake.

pub mod groq;

use async_trait::async_trait;

use crate::types::ProviderError;

/// Abstraction over text-completion providers.
///
/// Implementors send a single prompt and return the raw text of the
/// first completion choice. No retries: a failure is final for the call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete `prompt` and return the model's raw text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Model identifier string.
    fn model_name(&self) -> &str;
}
