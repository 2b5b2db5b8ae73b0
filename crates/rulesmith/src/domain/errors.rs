//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    /// Stable tag used in per-group outcomes
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::MissingInput(_) => "missing_input",
            DomainError::Validation(_) => "validation",
            DomainError::MalformedRequest(_) => "malformed_request",
            DomainError::ExternalService(_) => "external_service",
            DomainError::Persistence(_) => "persistence",
            DomainError::Configuration(_) => "configuration",
        }
    }

    pub fn missing_input<T: AsRef<str>>(what: T) -> Self {
        Self::MissingInput(what.as_ref().to_string())
    }

    pub fn persistence<T: std::fmt::Display>(context: &str, err: T) -> Self {
        Self::Persistence(format!("{context}: {err}"))
    }
}
