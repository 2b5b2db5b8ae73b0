//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::ports::LlmProvider;

/// Returns a canned response and records every prompt it receives
#[derive(Debug)]
pub struct MockProvider {
    response: String,
    /// Prompts containing this text fail with `ExternalService`
    fail_on: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail_on: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails
    pub fn failing() -> Self {
        Self::constant("").failing_on("")
    }

    /// Fail only for prompts containing `needle`
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.fail_on {
            Some(needle) if prompt.contains(needle.as_str()) => Err(DomainError::ExternalService(
                "mock service unavailable".to_string(),
            )),
            _ => Ok(self.response.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
