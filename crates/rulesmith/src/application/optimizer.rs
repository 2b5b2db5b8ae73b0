//! Rule Optimizer
//!
//! Drives prompt construction and the completion call. Failures come back
//! as values; nothing here panics on a bad response.

use std::sync::Arc;

use crate::application::PromptBuilder;
use crate::domain::{errors::DomainError, AlertObservation, OptimizationPrompt, RuleDefinition};
use crate::ports::LlmProvider;

/// Prefix of every error string produced by `optimize_or_report`
pub const ERROR_MARKER: &str = "⚠️";

#[derive(Clone)]
pub struct RuleOptimizer {
    provider: Arc<dyn LlmProvider>,
}

impl RuleOptimizer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Send a composed prompt to the provider
    pub async fn invoke(&self, prompt: &OptimizationPrompt) -> Result<String, DomainError> {
        tracing::info!(
            "🤖 Requesting rule optimization for '{}' ({} / {})",
            prompt.category,
            self.provider.provider_name(),
            self.provider.model_id()
        );

        match self.provider.generate(prompt.as_str()).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!("⚠️  Optimization failed for '{}': {}", prompt.category, e);
                Err(e)
            }
        }
    }

    /// Build the prompt and invoke the provider
    pub async fn optimize(
        &self,
        category: &str,
        rules: &[RuleDefinition],
        alerts: &[AlertObservation],
    ) -> Result<String, DomainError> {
        let prompt = PromptBuilder::build(category, rules, alerts)?;
        self.invoke(&prompt).await
    }

    /// Like `optimize`, but always yields printable text: either the
    /// optimized rules or an error line starting with `ERROR_MARKER`.
    pub async fn optimize_or_report(
        &self,
        category: &str,
        rules: &[RuleDefinition],
        alerts: &[AlertObservation],
    ) -> String {
        match self.optimize(category, rules, alerts).await {
            Ok(text) => text,
            Err(DomainError::MissingInput(_)) => {
                format!("{ERROR_MARKER} Error: No rules or alerts provided for optimization.")
            }
            Err(e) => format!("{ERROR_MARKER} AI Processing Error: {e}"),
        }
    }
}
