//! Review Store Port
//!
//! Persistence of AI-generated rule proposals awaiting human review.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::errors::DomainError;

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Store one optimization result and return where it was written
    async fn save(&self, category: &str, content: &str) -> Result<PathBuf, DomainError>;
}
