//! Fake completion provider for integration testing.
//!
//! Returns a scripted reply and records every prompt it receives,
//! all in-memory with no network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use meal_gateway::llm::CompletionProvider;
use meal_gateway::types::ProviderError;

/// A scripted provider. Cloning shares the recorded prompts.
#[derive(Clone)]
pub struct FakeProvider {
    reply: Arc<Mutex<Result<String, u16>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    /// Reply with `text` to every prompt.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(text.to_string()))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every call with an HTTP status from the provider.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err(status))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &*self.reply.lock().unwrap() {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ProviderError::Status {
                status: *status,
                body: "scripted failure".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
