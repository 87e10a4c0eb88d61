//! Groq LLM integration.
//!
//! Implements `CompletionProvider` against Groq's OpenAI-compatible chat
//! completions endpoint. One user message in, the first choice's text out.
//! Rate limiting, server errors and timeouts all surface as
//! `ProviderError`; nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::CompletionProvider;
use crate::config::ProviderConfig;
use crate::types::ProviderError;

// ---------------------------------------------------------------------------
// API types (OpenAI-compatible)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if the provider sent one.
    fn into_first_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or(ProviderError::EmptyCompletion)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GroqClient {
    http: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqClient {
    /// Build a client from provider settings and a resolved API key.
    pub fn new(config: &ProviderConfig, api_key: SecretString) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Groq completion request");

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, model = %self.model, error = %body, "Groq API error");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.into_first_text()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
