//! Rule Source Port
//!
//! Where the existing detection rules for a category come from.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, RuleDefinition};

#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Fetch the rules currently deployed for a category
    async fn fetch(&self, category: &str) -> Result<Vec<RuleDefinition>, DomainError>;

    /// Short name for logs
    fn source_name(&self) -> &str;
}
