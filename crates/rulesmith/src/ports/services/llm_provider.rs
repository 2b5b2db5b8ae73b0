//! LLM Provider Port
//!
//! Abstract interface for single-shot completion calls.
//! Each provider (Google, OpenAI, ...) has its own implementation.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// LLM Provider interface
///
/// # Example
///
/// ```rust,ignore
/// use rulesmith::ports::LlmProvider;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl LlmProvider for EchoProvider {
///     async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
///         Ok(prompt.to_string())
///     }
///     fn provider_name(&self) -> &str { "echo" }
///     fn model_id(&self) -> &str { "echo-1" }
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the text payload of the response
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
