//! Service Ports
//!
//! Abstract interfaces for external services.

mod llm_provider;
mod rule_source;

pub use llm_provider::*;
pub use rule_source::*;
